//! 像素格式定义.
//!
//! 描述解码输出帧的像素排列方式. 格式集合与参考解码器能输出的图像格式一一对应.

use std::fmt;

/// 像素格式
///
/// 命名规则: 颜色空间 + 采样方式 + 位深. `Custom` 后缀表示色彩空间由码流自定义.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum PixelFormat {
    /// 未指定
    #[default]
    None,

    // ========================
    // 8 位平面格式
    // ========================
    /// YV12: Y 平面 + V 平面 + U 平面, 4:2:0
    Yv12,
    /// YUV 4:2:0 平面格式 (I420)
    Yuv420p,
    /// YV12, 自定义色彩空间
    Yv12Custom,
    /// YUV 4:2:0 平面格式, 自定义色彩空间
    Yuv420pCustom,
    /// YUV 4:2:2 平面格式
    Yuv422p,
    /// YUV 4:4:4 平面格式
    Yuv444p,
    /// YUV 4:4:4 + Alpha 平面格式
    Yuva444p,

    // ========================
    // 高位深平面格式 (每分量 16 位存储)
    // ========================
    /// YUV 4:2:0, 10 位
    Yuv420p10,
    /// YUV 4:2:2, 10 位
    Yuv422p10,
    /// YUV 4:4:4, 10 位
    Yuv444p10,
}

impl PixelFormat {
    /// 获取单个分量的有效位深
    pub const fn bits_per_component(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Yuv420p10 | Self::Yuv422p10 | Self::Yuv444p10 => 10,
            _ => 8,
        }
    }

    /// 获取色度子采样 (log2 水平, log2 垂直)
    pub const fn chroma_subsampling(&self) -> (u32, u32) {
        match self {
            Self::Yv12
            | Self::Yuv420p
            | Self::Yv12Custom
            | Self::Yuv420pCustom
            | Self::Yuv420p10 => (1, 1),
            Self::Yuv422p | Self::Yuv422p10 => (1, 0),
            _ => (0, 0),
        }
    }

    /// 平面数量
    pub const fn plane_count(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Yuva444p => 4,
            _ => 3,
        }
    }

    /// 每个分量在内存中占用的字节数
    pub const fn bytes_per_component(&self) -> u32 {
        if self.bits_per_component() > 8 { 2 } else { 1 }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Yv12 => "yv12",
            Self::Yuv420p => "yuv420p",
            Self::Yv12Custom => "yv12-custom",
            Self::Yuv420pCustom => "yuv420p-custom",
            Self::Yuv422p => "yuv422p",
            Self::Yuv444p => "yuv444p",
            Self::Yuva444p => "yuva444p",
            Self::Yuv420p10 => "yuv420p10",
            Self::Yuv422p10 => "yuv422p10",
            Self::Yuv444p10 => "yuv444p10",
        };
        write!(f, "{name}")
    }
}
