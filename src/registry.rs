use crate::error::CalcError;
use crate::operation::Operation;
use crate::strategy::{self, Strategy};
use std::collections::HashMap;
use std::fmt;

/// 演算識別子から戦略への対応表。
///
/// 解決は対応表の参照だけで行う。振る舞いの追加や差し替えは `register` のみで済み、
/// 解決経路には手を入れない。同じ識別子への再登録は後勝ち。
#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<Operation, Strategy>,
}

impl StrategyRegistry {
    /// 四則演算の既定戦略をすべて登録した状態で作る
    pub fn new() -> Self {
        let mut strategies: HashMap<Operation, Strategy> = HashMap::new();
        strategies.insert(Operation::Add, strategy::from_fn(strategy::add));
        strategies.insert(Operation::Subtract, strategy::from_fn(strategy::subtract));
        strategies.insert(Operation::Multiply, strategy::from_fn(strategy::multiply));
        strategies.insert(Operation::Divide, strategy::from_fn(strategy::divide));

        Self { strategies }
    }

    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// 外部から渡された対応表で作る。欠けている識別子の解決は失敗する。
    pub fn from_strategies(strategies: HashMap<Operation, Strategy>) -> Self {
        Self { strategies }
    }

    pub fn resolve(&self, operation: impl Into<Option<Operation>>) -> Result<Strategy, CalcError> {
        let operation = operation.into();
        operation
            .and_then(|op| self.strategies.get(&op))
            .cloned()
            .ok_or(CalcError::UnsupportedOperation {
                operation,
                registry_empty: self.strategies.is_empty(),
            })
    }

    pub fn register(
        &mut self,
        operation: impl Into<Option<Operation>>,
        strategy: Option<Strategy>,
    ) -> Result<(), CalcError> {
        let (Some(operation), Some(strategy)) = (operation.into(), strategy) else {
            return Err(CalcError::InvalidArgument(
                "演算と戦略の両方を指定してください",
            ));
        };

        let replaced = self.strategies.insert(operation, strategy).is_some();
        tracing::info!(%operation, replaced, "戦略を登録");
        Ok(())
    }

    pub fn contains(&self, operation: Operation) -> bool {
        self.strategies.contains_key(&operation)
    }

    /// 戦略が束縛されている識別子（カタログ順）
    pub fn operations(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.contains(*op))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(Operation, Strategy)> for StrategyRegistry {
    fn from_iter<I: IntoIterator<Item = (Operation, Strategy)>>(iter: I) -> Self {
        Self::from_strategies(iter.into_iter().collect())
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("operations", &self.operations())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_is_complete() {
        let registry = StrategyRegistry::new();
        assert_eq!(registry.len(), 4);
        for op in Operation::ALL {
            assert!(registry.resolve(op).is_ok(), "{} が未登録", op);
        }
        assert_eq!(registry.operations(), Operation::ALL.to_vec());
    }

    #[test]
    fn test_resolve_absent_operation() {
        let registry = StrategyRegistry::new();
        let result = registry.resolve(None::<Operation>);
        assert!(matches!(
            result,
            Err(CalcError::UnsupportedOperation { operation: None, .. })
        ));
    }

    #[test]
    fn test_partial_registry_miss() {
        let registry: StrategyRegistry = [(Operation::Add, strategy::from_fn(strategy::add))]
            .into_iter()
            .collect();

        assert!(registry.resolve(Operation::Add).is_ok());
        assert!(matches!(
            registry.resolve(Operation::Divide),
            Err(CalcError::UnsupportedOperation {
                operation: Some(Operation::Divide),
                registry_empty: false,
            })
        ));
        assert_eq!(registry.operations(), vec![Operation::Add]);
    }

    #[test]
    fn test_empty_registry_miss() {
        let registry = StrategyRegistry::empty();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.resolve(Operation::Add),
            Err(CalcError::UnsupportedOperation {
                registry_empty: true,
                ..
            })
        ));
    }

    #[test]
    fn test_register_overrides_last_write_wins() {
        let mut registry = StrategyRegistry::new();
        registry
            .register(Operation::Add, Some(strategy::from_fn(|a, b| Ok(a * 10.0 + b))))
            .unwrap();
        registry
            .register(Operation::Add, Some(strategy::from_fn(|a, b| Ok(a - b))))
            .unwrap();

        let add = registry.resolve(Operation::Add).unwrap();
        assert_eq!(add(5.0, 3.0).unwrap(), 2.0);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_register_into_empty_registry() {
        let mut registry = StrategyRegistry::empty();
        registry
            .register(Operation::Multiply, Some(strategy::from_fn(strategy::multiply)))
            .unwrap();
        assert!(registry.contains(Operation::Multiply));
        assert!(!registry.contains(Operation::Add));
    }

    #[test]
    fn test_register_rejects_absent_arguments() {
        let mut registry = StrategyRegistry::new();

        let result = registry.register(None::<Operation>, Some(strategy::from_fn(strategy::add)));
        assert!(matches!(result, Err(CalcError::InvalidArgument(_))));

        let result = registry.register(Operation::Add, None);
        assert!(matches!(result, Err(CalcError::InvalidArgument(_))));

        // 失敗した登録は既存の束縛を壊さない
        let add = registry.resolve(Operation::Add).unwrap();
        assert_eq!(add(2.0, 2.0).unwrap(), 4.0);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = StrategyRegistry::new();
        let mut copy = original.clone();
        copy.register(Operation::Add, Some(strategy::from_fn(|_, _| Ok(0.0))))
            .unwrap();

        assert_eq!(original.resolve(Operation::Add).unwrap()(1.0, 1.0).unwrap(), 2.0);
        assert_eq!(copy.resolve(Operation::Add).unwrap()(1.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_debug_lists_operations() {
        let debug = format!("{:?}", StrategyRegistry::new());
        assert!(debug.contains("Add"));
        assert!(debug.contains("Divide"));
    }
}
