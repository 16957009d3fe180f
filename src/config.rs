use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// 標準入出力上のMCP
    Stdio,
    /// REST API
    Http,
}

/// 起動時の設定。引数がなければ環境変数、それもなければ既定値を使う。
#[derive(Debug, Clone, Parser)]
#[command(name = "flexible-calc", version, about = "四則演算と連鎖計算を提供するサーバ")]
pub struct Config {
    #[arg(long, env = "CALC_TRANSPORT", value_enum, default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// HTTP モードの待ち受けアドレス
    #[arg(long, env = "CALC_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// RUST_LOG が未設定のときのログフィルタ
    #[arg(long, env = "CALC_LOG", default_value = "info")]
    pub log_level: String,
}
