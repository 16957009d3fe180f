use crate::calculator::Calculator;
use crate::error::CalcError;
use crate::operation::Operation;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[schemars(description = "実行する演算（ADD, SUBTRACT, MULTIPLY, DIVIDE）")]
    pub operation: Option<Operation>,
    #[schemars(description = "左辺の数値")]
    pub num1: Option<f64>,
    #[schemars(description = "右辺の数値")]
    pub num2: Option<f64>,
}

impl CalculationRequest {
    pub fn execute(&self, calculator: &Calculator) -> Result<f64, CalcError> {
        calculator.evaluate(self.operation, self.num1, self.num2)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainOperationRequest {
    #[schemars(description = "現在値に適用する演算")]
    pub operation: Option<Operation>,
    #[schemars(description = "右辺の数値")]
    pub operand: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainCalculationRequest {
    #[schemars(description = "連鎖計算の初期値")]
    pub initial_value: Option<f64>,
    #[schemars(description = "先頭から順に適用する演算のリスト")]
    pub operations: Option<Vec<ChainOperationRequest>>,
}

impl ChainCalculationRequest {
    /// 形を全部確かめてから連鎖を始める
    pub fn execute(&self, calculator: &Calculator) -> Result<f64, CalcError> {
        if self.initial_value.is_none() {
            return Err(CalcError::InvalidArgument("初期値が指定されていません"));
        }
        let steps = match &self.operations {
            Some(steps) if !steps.is_empty() => steps,
            _ => return Err(CalcError::InvalidArgument("演算リストが空です")),
        };
        for step in steps {
            if step.operation.is_none() {
                return Err(CalcError::InvalidArgument("演算が指定されていません"));
            }
            if step.operand.is_none() {
                return Err(CalcError::InvalidArgument("被演算子が指定されていません"));
            }
        }

        let mut chain = calculator.start_chain(self.initial_value)?;
        chain.apply_all(steps.iter().map(|step| (step.operation, step.operand)))?;
        Ok(chain.result())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    #[serde(
        default,
        with = "non_finite",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub success: bool,
}

/// JSON の数値は無限大と NaN を表せないので、その三つだけ文字列で書く。
/// 無限大への桁あふれも成功した結果として返すため、`null` に潰さない。
mod non_finite {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) if v.is_nan() => serializer.serialize_str("NaN"),
            Some(v) if *v == f64::INFINITY => serializer.serialize_str("Infinity"),
            Some(v) if *v == f64::NEG_INFINITY => serializer.serialize_str("-Infinity"),
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_none(),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<Wire>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Wire::Number(v)) => Ok(Some(v)),
            Some(Wire::Text(text)) => match text.as_str() {
                "NaN" => Ok(Some(f64::NAN)),
                "Infinity" => Ok(Some(f64::INFINITY)),
                "-Infinity" => Ok(Some(f64::NEG_INFINITY)),
                other => Err(D::Error::custom(format!("数値として解釈できません: {}", other))),
            },
        }
    }
}

impl CalculationResponse {
    pub fn ok(result: f64) -> Self {
        Self {
            result: Some(result),
            error: None,
            success: true,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(error.into()),
            success: false,
        }
    }
}

impl From<Result<f64, CalcError>> for CalculationResponse {
    fn from(result: Result<f64, CalcError>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}
