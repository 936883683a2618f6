//! 解码输出的视频帧.
//!
//! 与引擎无关的统一帧表示, 由适配层从 [`EngineImage`](crate::engine::EngineImage) 翻译而来.

use bytes::Bytes;
use conform_core::{PixelFormat, Rational};

/// 视频帧
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// 各平面的像素数据
    pub data: Vec<Bytes>,
    /// 各平面每行的字节数 (stride)
    pub linesize: Vec<usize>,
    /// 存储宽度 (像素)
    pub width: u32,
    /// 存储高度 (像素)
    pub height: u32,
    /// 显示宽度 (像素)
    pub display_width: u32,
    /// 显示高度 (像素)
    pub display_height: u32,
    /// 像素格式
    pub pixel_format: PixelFormat,
    /// 每个采样的位数
    pub bits_per_sample: u32,
    /// 时间戳 (以 time_base 为单位)
    pub timestamp: u64,
    /// 时间基
    pub time_base: Rational,
}

impl VideoFrame {
    /// 创建空的视频帧
    pub fn new(width: u32, height: u32, pixel_format: PixelFormat) -> Self {
        let plane_count = pixel_format.plane_count() as usize;
        Self {
            data: vec![Bytes::new(); plane_count],
            linesize: vec![0; plane_count],
            width,
            height,
            display_width: width,
            display_height: height,
            pixel_format,
            bits_per_sample: pixel_format.bits_per_component(),
            timestamp: 0,
            time_base: Rational::MILLI,
        }
    }

    /// 平面数量
    pub fn plane_count(&self) -> usize {
        self.data.len()
    }
}
