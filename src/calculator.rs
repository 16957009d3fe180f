use crate::error::CalcError;
use crate::operation::Operation;
use crate::registry::StrategyRegistry;
use crate::strategy::Strategy;
use parking_lot::RwLock;
use std::sync::Arc;

/// 演算の評価と連鎖計算の入口。
///
/// `Clone` は同じレジストリを指すハンドルを複製するだけ。
#[derive(Debug, Clone)]
pub struct Calculator {
    registry: Arc<RwLock<StrategyRegistry>>,
}

impl Calculator {
    /// 既定戦略を持つ専用レジストリで作る
    pub fn new() -> Self {
        Self::with_registry(StrategyRegistry::new())
    }

    pub fn with_registry(registry: StrategyRegistry) -> Self {
        Self::shared(Arc::new(RwLock::new(registry)))
    }

    /// 呼び出し側と共有するレジストリを注入する。
    /// 登録は書き込みロックの下で行われ、次の解決からすぐに見える。
    pub fn shared(registry: Arc<RwLock<StrategyRegistry>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> Arc<RwLock<StrategyRegistry>> {
        Arc::clone(&self.registry)
    }

    pub fn register(
        &self,
        operation: impl Into<Option<Operation>>,
        strategy: Option<Strategy>,
    ) -> Result<(), CalcError> {
        self.registry.write().register(operation, strategy)
    }

    /// 探索用のカタログ
    pub fn operations(&self) -> &'static [Operation] {
        &Operation::ALL
    }

    pub fn evaluate(
        &self,
        operation: impl Into<Option<Operation>>,
        a: impl Into<Option<f64>>,
        b: impl Into<Option<f64>>,
    ) -> Result<f64, CalcError> {
        let Some(operation) = operation.into() else {
            return Err(CalcError::InvalidArgument("演算が指定されていません"));
        };
        let (Some(a), Some(b)) = (a.into(), b.into()) else {
            return Err(CalcError::InvalidArgument("数値が指定されていません"));
        };

        // ロックは解決の間だけ保持する
        let strategy = self.registry.read().resolve(operation)?;
        let result = strategy(a, b);
        tracing::debug!(%operation, a, b, ok = result.is_ok(), "演算を評価");
        result
    }

    pub fn start_chain(&self, initial: impl Into<Option<f64>>) -> Result<Chain, CalcError> {
        let initial = initial
            .into()
            .ok_or(CalcError::InvalidArgument("初期値が指定されていません"))?;
        Ok(Chain {
            calculator: self.clone(),
            value: initial,
        })
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// 初期値から演算を順に畳み込む累積器。
///
/// 失敗した `apply` は値を変えないので、同じ `Chain` をそのまま使い続けられる。
/// 単一の所有者が使う前提で、スレッド間で共有しない。
#[derive(Debug)]
pub struct Chain {
    calculator: Calculator,
    value: f64,
}

impl Chain {
    pub fn apply(
        &mut self,
        operation: impl Into<Option<Operation>>,
        operand: impl Into<Option<f64>>,
    ) -> Result<&mut Self, CalcError> {
        let operation = operation.into();
        let Some(operand) = operand.into() else {
            return Err(CalcError::InvalidArgument("被演算子が指定されていません"));
        };

        self.value = self.calculator.evaluate(operation, self.value, operand)?;
        Ok(self)
    }

    /// 手順を先頭から適用し、最初の失敗で止める。
    /// 失敗時の値は直前に成功した手順の結果のまま。
    pub fn apply_all<I, O, N>(&mut self, steps: I) -> Result<&mut Self, CalcError>
    where
        I: IntoIterator<Item = (O, N)>,
        O: Into<Option<Operation>>,
        N: Into<Option<f64>>,
    {
        for (operation, operand) in steps {
            self.apply(operation, operand)?;
        }
        Ok(self)
    }

    pub fn result(&self) -> f64 {
        self.value
    }

    pub fn reset(&mut self, value: impl Into<Option<f64>>) -> Result<&mut Self, CalcError> {
        self.value = value
            .into()
            .ok_or(CalcError::InvalidArgument("値が指定されていません"))?;
        Ok(self)
    }
}
