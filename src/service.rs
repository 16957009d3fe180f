use crate::calculator::Calculator;
use crate::dto::{CalculationRequest, ChainCalculationRequest};
use rmcp::{
    model::{Implementation, InitializeResult, ProtocolVersion, ServerCapabilities},
    tool, ServerHandler,
};

#[derive(Clone, Default)]
pub struct CalculatorService {
    calculator: Calculator,
}

impl CalculatorService {
    pub fn new(calculator: Calculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }
}

fn render(result: Result<f64, crate::error::CalcError>) -> Result<String, String> {
    match result {
        Ok(value) => Ok(format!("計算結果: {}", value)),
        Err(e) => {
            tracing::warn!(error = %e, "計算に失敗");
            Err(format!("計算エラー: {}", e))
        }
    }
}

#[tool(tool_box)]
impl CalculatorService {
    #[tool(
        description = "二つの数値に四則演算を一つ適用します。operation には ADD, SUBTRACT, MULTIPLY, DIVIDE のいずれかを指定し、num1 が左辺、num2 が右辺になります。"
    )]
    pub fn calculate(&self, #[tool(aggr)] request: CalculationRequest) -> Result<String, String> {
        render(request.execute(&self.calculator))
    }

    #[tool(
        description = "初期値から演算を順に適用する連鎖計算を行います。各手順は直前の結果を左辺として使います。"
    )]
    pub fn chain(&self, #[tool(aggr)] request: ChainCalculationRequest) -> Result<String, String> {
        render(request.execute(&self.calculator))
    }

    #[tool(description = "利用できる演算の一覧を返します。")]
    pub fn operations(&self) -> String {
        let names: Vec<&str> = self
            .calculator
            .operations()
            .iter()
            .map(|op| op.as_str())
            .collect();
        format!("利用可能な演算: {}", names.join(", "))
    }
}

#[tool(tool_box)]
impl ServerHandler for CalculatorService {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
            instructions: Some(
                "四則演算と連鎖計算を提供するMCPサーバです。演算名と数値を受け取って計算結果を返します。"
                    .into(),
            ),
        }
    }
}
