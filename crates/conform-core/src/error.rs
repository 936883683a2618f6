//! 统一错误类型定义.
//!
//! 错误分类与参考解码器的状态码一一对应, 额外补充了码流解析器使用的
//! `InvalidData` / `Eof` 两类.

use thiserror::Error;

/// 一致性分析框架统一错误类型
#[derive(Debug, Error)]
pub enum ConformError {
    /// 未指定的错误
    #[error("解码错误: {0}")]
    Error(String),

    /// 内存操作失败
    #[error("内存操作失败: {0}")]
    MemError(String),

    /// ABI 版本不匹配
    #[error("ABI 版本不匹配: {0}")]
    AbiMismatch(String),

    /// 解码器不具备所需能力
    #[error("解码器不具备所需能力: {0}")]
    Incapable(String),

    /// 不支持的码流 (对整条流致命)
    #[error("不支持的码流: {0}")]
    UnsupBitstream(String),

    /// 码流使用了不支持的特性 (对整条流或当前 GOP 致命)
    #[error("不支持的特性: {0}")]
    UnsupFeature(String),

    /// 当前帧数据损坏或不完整 (对整条流或当前 GOP 致命)
    #[error("帧数据损坏: {0}")]
    CorruptFrame(String),

    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidParam(String),

    /// 迭代器已到达列表末尾
    #[error("已到达列表末尾")]
    ListEnd,

    /// 暂无可输出的帧, 需要更多输入 (正常信号, 不是错误)
    #[error("需要更多输入数据")]
    NeedMoreInput,

    /// 无效数据 (损坏的 OBU 等)
    #[error("无效数据: {0}")]
    InvalidData(String),

    /// 比特流读取越界
    #[error("已到达数据末尾")]
    Eof,
}

impl ConformError {
    /// 适配层对外的数值错误码
    ///
    /// 0 保留给成功, 解码器错误取其原始编号的相反数,
    /// `NeedMoreInput` 固定为 -100.
    pub const fn code(&self) -> i32 {
        match self {
            Self::Error(_) | Self::InvalidData(_) | Self::Eof => -1,
            Self::MemError(_) => -2,
            Self::AbiMismatch(_) => -3,
            Self::Incapable(_) => -4,
            Self::UnsupBitstream(_) => -5,
            Self::UnsupFeature(_) => -6,
            Self::CorruptFrame(_) => -7,
            Self::InvalidParam(_) => -8,
            Self::ListEnd => -9,
            Self::NeedMoreInput => -100,
        }
    }

    /// 是否为 "需要更多输入" 信号
    pub const fn is_need_more_input(&self) -> bool {
        matches!(self, Self::NeedMoreInput)
    }
}

/// 一致性分析框架统一 Result 类型
pub type ConformResult<T> = Result<T, ConformError>;
