//! 块尺寸分类.
//!
//! 块尺寸枚举的取值顺序与解码器内部的 `BLOCK_SIZE` 枚举完全一致,
//! 检查数据中的原始值可直接通过 [`BlockSize::from_raw`] 转换.

use std::fmt;

/// 超级块 (最大块) 边长
pub const SUPERBLOCK_SIZE: u32 = 128;

/// 块尺寸 (宽 x 高)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BlockSize {
    Block4x4 = 0,
    Block4x8 = 1,
    Block8x4 = 2,
    Block8x8 = 3,
    Block8x16 = 4,
    Block16x8 = 5,
    Block16x16 = 6,
    Block16x32 = 7,
    Block32x16 = 8,
    Block32x32 = 9,
    Block32x64 = 10,
    Block64x32 = 11,
    Block64x64 = 12,
    Block64x128 = 13,
    Block128x64 = 14,
    Block128x128 = 15,
    Block4x16 = 16,
    Block16x4 = 17,
    Block8x32 = 18,
    Block32x8 = 19,
    Block16x64 = 20,
    Block64x16 = 21,
}

impl BlockSize {
    /// 块尺寸总数
    pub const COUNT: usize = 22;

    /// 全部块尺寸, 按枚举值排列
    pub const ALL: [BlockSize; Self::COUNT] = [
        Self::Block4x4,
        Self::Block4x8,
        Self::Block8x4,
        Self::Block8x8,
        Self::Block8x16,
        Self::Block16x8,
        Self::Block16x16,
        Self::Block16x32,
        Self::Block32x16,
        Self::Block32x32,
        Self::Block32x64,
        Self::Block64x32,
        Self::Block64x64,
        Self::Block64x128,
        Self::Block128x64,
        Self::Block128x128,
        Self::Block4x16,
        Self::Block16x4,
        Self::Block8x32,
        Self::Block32x8,
        Self::Block16x64,
        Self::Block64x16,
    ];

    /// 从解码器枚举值转换, 超出范围返回 `None`
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    /// 从解码器枚举值转换, 超出范围视为与解码器枚举失配, 直接终止
    pub fn from_raw_checked(raw: u8) -> Self {
        match Self::from_raw(raw) {
            Some(bs) => bs,
            None => panic!("块尺寸枚举值 {raw} 超出范围, 与解码器枚举定义不一致"),
        }
    }

    /// 宽度 (像素)
    pub const fn width(&self) -> u32 {
        match self {
            Self::Block4x4 | Self::Block4x8 | Self::Block4x16 => 4,
            Self::Block8x4 | Self::Block8x8 | Self::Block8x16 | Self::Block8x32 => 8,
            Self::Block16x8
            | Self::Block16x16
            | Self::Block16x32
            | Self::Block16x4
            | Self::Block16x64 => 16,
            Self::Block32x16 | Self::Block32x32 | Self::Block32x64 | Self::Block32x8 => 32,
            Self::Block64x32
            | Self::Block64x64
            | Self::Block64x128
            | Self::Block64x16 => 64,
            Self::Block128x64 | Self::Block128x128 => 128,
        }
    }

    /// 高度 (像素)
    pub const fn height(&self) -> u32 {
        match self {
            Self::Block4x4 | Self::Block8x4 | Self::Block16x4 => 4,
            Self::Block4x8 | Self::Block8x8 | Self::Block16x8 | Self::Block32x8 => 8,
            Self::Block8x16
            | Self::Block16x16
            | Self::Block32x16
            | Self::Block4x16
            | Self::Block64x16 => 16,
            Self::Block16x32 | Self::Block32x32 | Self::Block64x32 | Self::Block8x32 => 32,
            Self::Block32x64
            | Self::Block64x64
            | Self::Block128x64
            | Self::Block16x64 => 64,
            Self::Block64x128 | Self::Block128x128 => 128,
        }
    }

    /// 块所属的分割层级边长
    ///
    /// 非方形块归入能容纳它的最小方形层级, 例如 4x8 → 8, 4x16 → 16.
    pub const fn min_side_length(&self) -> u32 {
        match self {
            Self::Block4x4 => 4,
            Self::Block4x8 | Self::Block8x4 | Self::Block8x8 => 8,
            Self::Block8x16
            | Self::Block16x8
            | Self::Block16x16
            | Self::Block4x16
            | Self::Block16x4 => 16,
            Self::Block16x32
            | Self::Block32x16
            | Self::Block32x32
            | Self::Block8x32
            | Self::Block32x8 => 32,
            Self::Block32x64
            | Self::Block64x32
            | Self::Block64x64
            | Self::Block16x64
            | Self::Block64x16 => 64,
            Self::Block64x128 | Self::Block128x64 | Self::Block128x128 => 128,
        }
    }

    /// 是否为扩展 (非方形) 块
    pub const fn is_extended(&self) -> bool {
        !matches!(
            self,
            Self::Block4x4
                | Self::Block8x8
                | Self::Block16x16
                | Self::Block32x32
                | Self::Block64x64
                | Self::Block128x128
        )
    }
}

impl fmt::Display for BlockSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

/// 按解码器枚举值查询分割层级边长
pub fn min_side_length(raw: u8) -> u32 {
    BlockSize::from_raw_checked(raw).min_side_length()
}

/// 按解码器枚举值判断是否为扩展块
pub fn is_extended(raw: u8) -> bool {
    BlockSize::from_raw_checked(raw).is_extended()
}

/// 由最小块边长计算分割深度: log2(128 / 边长)
///
/// 边长为 0 (尚未观察到任何块) 时深度未知, 返回 `None`.
pub fn partition_depth(min_side_length: u32) -> Option<u32> {
    if min_side_length == 0 {
        return None;
    }
    let ratio = SUPERBLOCK_SIZE / min_side_length;
    if ratio == 0 {
        return None;
    }
    Some(ratio.ilog2())
}
