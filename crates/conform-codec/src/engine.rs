//! 外部 AV1 解码引擎 trait 定义.
//!
//! 参考解码器适配层不实现任何解码算法, 而是通过 [`Av1Engine`] 驱动一个外部引擎.
//! 引擎的错误分类与图像格式编号沿用其原生定义, 由适配层负责翻译.

use bytes::Bytes;
use conform_core::ConformError;

use crate::inspect::InspectionSink;

/// 引擎错误分类
///
/// 原始编号 1-9 与引擎的原生状态码一致, 0 表示成功, 不在此枚举中.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineErrorKind {
    Error = 1,
    MemError = 2,
    AbiMismatch = 3,
    Incapable = 4,
    UnsupBitstream = 5,
    UnsupFeature = 6,
    CorruptFrame = 7,
    InvalidParam = 8,
    ListEnd = 9,
}

impl EngineErrorKind {
    /// 从引擎原生状态码转换, 0 (成功) 与未知编号返回 `None`
    pub const fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => Self::Error,
            2 => Self::MemError,
            3 => Self::AbiMismatch,
            4 => Self::Incapable,
            5 => Self::UnsupBitstream,
            6 => Self::UnsupFeature,
            7 => Self::CorruptFrame,
            8 => Self::InvalidParam,
            9 => Self::ListEnd,
            _ => return None,
        })
    }
}

/// 引擎错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    /// 错误分类
    pub kind: EngineErrorKind,
    /// 引擎给出的详细信息
    pub detail: String,
}

impl EngineError {
    pub fn new(kind: EngineErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl From<EngineError> for ConformError {
    fn from(err: EngineError) -> Self {
        let detail = err.detail;
        match err.kind {
            EngineErrorKind::Error => ConformError::Error(detail),
            EngineErrorKind::MemError => ConformError::MemError(detail),
            EngineErrorKind::AbiMismatch => ConformError::AbiMismatch(detail),
            EngineErrorKind::Incapable => ConformError::Incapable(detail),
            EngineErrorKind::UnsupBitstream => ConformError::UnsupBitstream(detail),
            EngineErrorKind::UnsupFeature => ConformError::UnsupFeature(detail),
            EngineErrorKind::CorruptFrame => ConformError::CorruptFrame(detail),
            EngineErrorKind::InvalidParam => ConformError::InvalidParam(detail),
            EngineErrorKind::ListEnd => ConformError::ListEnd,
        }
    }
}

/// 引擎原生图像格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineImageFormat {
    Yv12,
    I420,
    /// YV12, 自定义色彩空间
    AomYv12,
    /// I420, 自定义色彩空间
    AomI420,
    I422,
    I444,
    I444a,
    I42016,
    I42216,
    I44416,
    /// 其它原生格式编号
    Other(u32),
}

impl EngineImageFormat {
    /// 平面存储标志位
    pub const PLANAR: u32 = 0x100;
    /// U/V 平面交换标志位
    pub const UV_FLIP: u32 = 0x200;
    /// 含 alpha 平面标志位
    pub const HAS_ALPHA: u32 = 0x400;
    /// 高位深 (每分量 16 位存储) 标志位
    pub const HIGHBITDEPTH: u32 = 0x800;

    /// 原生格式编号
    pub const fn raw(&self) -> u32 {
        match self {
            Self::Yv12 => Self::PLANAR | Self::UV_FLIP | 1,
            Self::I420 => Self::PLANAR | 2,
            Self::AomYv12 => Self::PLANAR | Self::UV_FLIP | 3,
            Self::AomI420 => Self::PLANAR | 4,
            Self::I422 => Self::PLANAR | 5,
            Self::I444 => Self::PLANAR | 6,
            Self::I444a => Self::PLANAR | Self::HAS_ALPHA | 6,
            Self::I42016 => Self::PLANAR | Self::HIGHBITDEPTH | 2,
            Self::I42216 => Self::PLANAR | Self::HIGHBITDEPTH | 5,
            Self::I44416 => Self::PLANAR | Self::HIGHBITDEPTH | 6,
            Self::Other(raw) => *raw,
        }
    }

    /// 是否带高位深标志
    pub const fn is_high_bitdepth(&self) -> bool {
        self.raw() & Self::HIGHBITDEPTH != 0
    }
}

/// 引擎输出的解码图像 (显示顺序)
#[derive(Debug, Clone)]
pub struct EngineImage {
    /// 原生图像格式
    pub format: EngineImageFormat,
    /// 存储宽度 (像素)
    pub width: u32,
    /// 存储高度 (像素)
    pub height: u32,
    /// 显示宽度 (像素)
    pub display_width: u32,
    /// 显示高度 (像素)
    pub display_height: u32,
    /// 引擎报告的位深
    pub bit_depth: u32,
    /// 各平面每行字节数
    pub stride: Vec<usize>,
    /// 各平面数据
    pub planes: Vec<Bytes>,
}

/// 外部 AV1 解码引擎
///
/// 调用流程:
/// 1. `init()` 初始化引擎
/// 2. 需要逐帧检查数据时调用 `enable_inspection()`
/// 3. 反复调用 `decode()` 送入一帧压缩数据, 再用 `next_image()` 取出已就绪的图像
/// 4. 会话结束时调用 `destroy()`
pub trait Av1Engine: Send {
    /// 引擎名称
    fn name(&self) -> &str;

    /// 初始化引擎
    fn init(&mut self) -> Result<(), EngineError>;

    /// 开启逐帧检查回调
    fn enable_inspection(&mut self) -> Result<(), EngineError>;

    /// 解码一段压缩数据
    ///
    /// 开启检查且传入 `inspector` 时, 每完成一帧在本调用栈内同步回调一次
    /// `inspector.on_frame()`. 一次调用可能完成零帧或多帧.
    fn decode(
        &mut self,
        data: &[u8],
        inspector: Option<&mut dyn InspectionSink>,
    ) -> Result<(), EngineError>;

    /// 取出下一张已就绪的图像, 没有时返回 `None`
    fn next_image(&mut self) -> Option<EngineImage>;

    /// 释放引擎资源
    ///
    /// 即使 `init()` 失败也会被调用一次, 实现需容忍未初始化状态.
    fn destroy(&mut self);
}
