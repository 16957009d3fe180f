use crate::error::CalcError;
use std::sync::Arc;

/// 演算識別子に束縛される二項関数。
///
/// 状態を持たず、複数の評価から同時に呼ばれても安全であること。
pub type Strategy = Arc<dyn Fn(f64, f64) -> Result<f64, CalcError> + Send + Sync>;

/// クロージャや関数を `Strategy` に包む
pub fn from_fn<F>(f: F) -> Strategy
where
    F: Fn(f64, f64) -> Result<f64, CalcError> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn add(a: f64, b: f64) -> Result<f64, CalcError> {
    Ok(a + b)
}

pub fn subtract(a: f64, b: f64) -> Result<f64, CalcError> {
    Ok(a - b)
}

pub fn multiply(a: f64, b: f64) -> Result<f64, CalcError> {
    Ok(a * b)
}

/// 除数がちょうどゼロ（符号は問わない）のときは被除数に関係なく失敗する
pub fn divide(a: f64, b: f64) -> Result<f64, CalcError> {
    if b == 0.0 {
        return Err(CalcError::ArithmeticInvalid("ゼロ除算は許可されていません"));
    }
    Ok(a / b)
}
