use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 電卓が受け付ける二項演算の識別子。
///
/// 集合は閉じている。振る舞いの追加・差し替えは `StrategyRegistry` への登録で行い、
/// ここに分岐を持たせない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// 宣言順の全演算（探索用）
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "ADD",
            Operation::Subtract => "SUBTRACT",
            Operation::Multiply => "MULTIPLY",
            Operation::Divide => "DIVIDE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        assert_eq!(
            Operation::ALL,
            [
                Operation::Add,
                Operation::Subtract,
                Operation::Multiply,
                Operation::Divide
            ]
        );
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&Operation::ALL).unwrap();
        assert_eq!(json, r#"["ADD","SUBTRACT","MULTIPLY","DIVIDE"]"#);

        let op: Operation = serde_json::from_str(r#""MULTIPLY""#).unwrap();
        assert_eq!(op, Operation::Multiply);

        // 小文字はワイヤ上では受け付けない
        assert!(serde_json::from_str::<Operation>(r#""multiply""#).is_err());
    }

    #[test]
    fn test_display_matches_wire_name() {
        for op in Operation::ALL {
            assert_eq!(op.to_string(), serde_json::to_value(op).unwrap());
        }
    }
}
