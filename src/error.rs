use crate::operation::Operation;

/// 電卓コアが返すエラー。
///
/// 上位の三種はトランスポート側でそれぞれ別のステータスに対応付ける。
/// `Strategy` は独自戦略の想定外の失敗で、分類せずにそのまま呼び出し元へ渡す。
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    #[error("不正な入力: {0}")]
    InvalidArgument(&'static str),

    #[error("未サポートの演算: {}", describe_unsupported(.operation, .registry_empty))]
    UnsupportedOperation {
        operation: Option<Operation>,
        registry_empty: bool,
    },

    #[error("算術エラー: {0}")]
    ArithmeticInvalid(&'static str),

    #[error("内部エラー: {0}")]
    Strategy(#[from] anyhow::Error),
}

fn describe_unsupported(operation: &Option<Operation>, registry_empty: &bool) -> String {
    match (operation, registry_empty) {
        (None, _) => "演算が指定されていません".to_string(),
        (Some(op), true) => format!("{} (戦略が一つも登録されていません)", op),
        (Some(op), false) => format!("{} に対応する戦略がありません", op),
    }
}

impl CalcError {
    /// 呼び出し側の入力に起因するエラーかどうか
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CalcError::Strategy(_))
    }
}
