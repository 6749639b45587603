use thiserror::Error;

/// # Summary
/// 日线行情域错误枚举。任何变体对运行器都只意味着
/// “跳过当前股票”，绝不中断整次运行。
#[derive(Error, Debug)]
pub enum MarketError {
    // 传输层错误（HTTP 连接失败、超时、非成功状态码）
    #[error("Network error: {0}")]
    Network(String),
    // 响应数据解析错误（JSON 结构不匹配、时间戳非法）
    #[error("Parse error: {0}")]
    Parse(String),
    // 请求的证券无数据（无效代码或返回为空）
    #[error("Data not found")]
    NotFound,
    // 数据源返回的业务级错误（例如 Yahoo chart.error 的描述信息）
    #[error("Provider error: {0}")]
    Provider(String),
}
