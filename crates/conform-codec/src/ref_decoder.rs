//! 参考解码器适配层.
//!
//! [`RefDecoder`] 驱动一个外部 [`Av1Engine`], 对外提供:
//! - 逐段送入压缩数据 (`decode`)
//! - 按显示顺序取出解码帧 (`get_frame`)
//! - 按名称查询语法元素与派生指标 (`get_syntax_element`)
//!
//! 开启分析功能时, 每段数据会先交给语法元素来源 (默认为序列头解析器),
//! 引擎在解码过程中逐帧回调检查记录, 由内部的帧统计累加器汇总.

use log::{debug, error, warn};

use conform_core::{ConformError, ConformResult, PixelFormat, Rational};

use crate::engine::{Av1Engine, EngineImage, EngineImageFormat};
use crate::frame::VideoFrame;
use crate::inspect::InspectionSink;
use crate::parsers::av1::SequenceHeaderParser;
use crate::stats::{FrameStatsAccumulator, InspectParams};
use crate::syntax::{ResolveContext, SyntaxResolver, SyntaxSource};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 引擎尚未初始化
    Uninitialized,
    /// 已初始化, 尚未送入数据
    Ready,
    /// 已送入数据, 等待取帧
    Decoding,
    /// 刚取出一帧
    FrameAvailable,
    /// 已关闭
    Closed,
}

/// 参考解码器配置
#[derive(Debug, Clone)]
pub struct RefDecoderConfig {
    /// 是否开启分析 (语法元素解析 + 逐帧检查)
    pub enable_analyzer: bool,
    /// 相邻帧时间戳间隔 (毫秒)
    pub frame_interval_ms: u64,
    /// 首帧时间戳 (毫秒)
    pub initial_timestamp: u64,
}

impl Default for RefDecoderConfig {
    fn default() -> Self {
        Self {
            enable_analyzer: false,
            frame_interval_ms: 1,
            initial_timestamp: 0,
        }
    }
}

/// 参考解码器
pub struct RefDecoder {
    engine: Box<dyn Av1Engine>,
    parser: Option<Box<dyn SyntaxSource + Send>>,
    stats: FrameStatsAccumulator,
    inspection_enabled: bool,
    state: SessionState,
    /// 已取出的帧数
    decoded_frames: u32,
    /// 成功送入的压缩数据总字节数
    encoded_bytes: u64,
    /// 单次送入的最大字节数
    burst_bytes: u64,
    frame_interval_ms: u64,
    initial_timestamp: u64,
}

/// 创建参考解码器, 开启分析时附带序列头解析器
pub fn create_reference_decoder(
    engine: Box<dyn Av1Engine>,
    enable_analyzer: bool,
) -> ConformResult<RefDecoder> {
    RefDecoder::new(
        engine,
        RefDecoderConfig {
            enable_analyzer,
            ..RefDecoderConfig::default()
        },
    )
}

impl RefDecoder {
    /// 创建并初始化参考解码器
    ///
    /// 开启分析时使用 [`SequenceHeaderParser`] 作为语法元素来源.
    pub fn new(engine: Box<dyn Av1Engine>, config: RefDecoderConfig) -> ConformResult<Self> {
        let parser: Option<Box<dyn SyntaxSource + Send>> = if config.enable_analyzer {
            Some(Box::new(SequenceHeaderParser::new()))
        } else {
            None
        };
        Self::open(engine, config, parser)
    }

    /// 使用指定的语法元素来源创建参考解码器
    ///
    /// 逐帧检查是否开启仍由 `config.enable_analyzer` 决定.
    pub fn with_parser(
        engine: Box<dyn Av1Engine>,
        config: RefDecoderConfig,
        parser: Box<dyn SyntaxSource + Send>,
    ) -> ConformResult<Self> {
        Self::open(engine, config, Some(parser))
    }

    fn open(
        engine: Box<dyn Av1Engine>,
        config: RefDecoderConfig,
        parser: Option<Box<dyn SyntaxSource + Send>>,
    ) -> ConformResult<Self> {
        let mut dec = Self {
            engine,
            parser,
            stats: FrameStatsAccumulator::new(),
            inspection_enabled: false,
            state: SessionState::Uninitialized,
            decoded_frames: 0,
            encoded_bytes: 0,
            burst_bytes: 0,
            frame_interval_ms: config.frame_interval_ms,
            initial_timestamp: config.initial_timestamp,
        };

        if let Err(e) = dec.engine.init() {
            error!("无法创建参考解码器 ({}): {}", dec.engine.name(), e.detail);
            return Err(e.into());
        }
        dec.state = SessionState::Ready;

        if config.enable_analyzer {
            match dec.engine.enable_inspection() {
                Ok(()) => dec.inspection_enabled = true,
                Err(e) => warn!("逐帧检查回调注册失败, 仅保留语法元素解析: {}", e.detail),
            }
        }

        debug!(
            "参考解码器就绪: 引擎={}, 分析={}, 逐帧检查={}",
            dec.engine.name(),
            config.enable_analyzer,
            dec.inspection_enabled,
        );
        Ok(dec)
    }

    /// 当前会话状态
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 送入一段压缩数据
    ///
    /// 失败时计数器保持不变, 错误按引擎分类原样返回.
    pub fn decode(&mut self, data: &[u8]) -> ConformResult<()> {
        self.ensure_open("decode")?;

        if let Some(parser) = self.parser.as_mut() {
            parser.input_obu_data(data);
        }

        let inspector = if self.inspection_enabled {
            Some(&mut self.stats as &mut dyn InspectionSink)
        } else {
            None
        };
        if let Err(e) = self.engine.decode(data, inspector) {
            error!("解码失败 ({:?}, {} 字节): {}", e.kind, data.len(), e.detail);
            return Err(e.into());
        }

        let size = data.len() as u64;
        self.encoded_bytes += size;
        self.burst_bytes = self.burst_bytes.max(size);
        self.state = SessionState::Decoding;
        Ok(())
    }

    /// 取出下一帧
    ///
    /// 没有可取出的帧时返回 [`ConformError::NeedMoreInput`].
    pub fn get_frame(&mut self) -> ConformResult<VideoFrame> {
        self.ensure_open("get_frame")?;

        let Some(image) = self.engine.next_image() else {
            if self.state == SessionState::FrameAvailable {
                self.state = SessionState::Decoding;
            }
            return Err(ConformError::NeedMoreInput);
        };

        let frame = self.translate_image(image);
        self.stats.set_resolution(frame.width, frame.height);
        self.decoded_frames += 1;
        self.state = SessionState::FrameAvailable;
        Ok(frame)
    }

    fn translate_image(&self, image: EngineImage) -> VideoFrame {
        let mut frame = VideoFrame::new(image.width, image.height, translate_format(image.format));
        frame.display_width = image.display_width;
        frame.display_height = image.display_height;
        frame.linesize = image.stride;
        frame.data = image.planes;
        // 引擎报告的 bit_depth 与格式标志可能不一致, 以格式为准
        frame.bits_per_sample = if image.format.is_high_bitdepth() {
            10
        } else {
            image.bit_depth
        };
        frame.timestamp =
            self.initial_timestamp + u64::from(self.decoded_frames) * self.frame_interval_ms;
        frame.time_base = Rational::MILLI;
        frame
    }

    /// 按名称查询语法元素
    ///
    /// 先询问语法元素来源, 回答为空时再计算派生指标. 未知名称返回空字符串.
    pub fn get_syntax_element(&self, name: &str) -> String {
        self.resolver().get(name)
    }

    /// 按名称与帧序号查询逐帧语法元素 (目前仅 `use_qp_file`)
    ///
    /// # Panics
    /// 帧序号超出已检查帧数时 panic.
    pub fn get_syntax_element_at(&self, name: &str, index: u32) -> String {
        self.resolver().get_at(name, index as usize)
    }

    fn resolver(&self) -> SyntaxResolver<'_> {
        let parser = self.parser.as_deref().map(|p| p as &dyn SyntaxSource);
        SyntaxResolver::new(
            parser,
            ResolveContext {
                params: self.stats.params(),
                encoded_bytes: self.encoded_bytes,
                burst_bytes: self.burst_bytes,
                decoded_frames: self.decoded_frames,
            },
        )
    }

    /// 预设码流分辨率, 使首帧的检查数据也能被统计
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.stats.set_resolution(width, height);
    }

    /// 关闭会话并释放引擎, 可重复调用
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.stats.release();
        self.parser = None;
        self.engine.destroy();
        self.inspection_enabled = false;
        self.state = SessionState::Closed;
        debug!(
            "参考解码器已关闭: {} 帧, {} 字节",
            self.decoded_frames, self.encoded_bytes
        );
    }

    /// 已取出的帧数
    pub fn decoded_frames(&self) -> u32 {
        self.decoded_frames
    }

    /// 成功送入的压缩数据总字节数
    pub fn encoded_bytes(&self) -> u64 {
        self.encoded_bytes
    }

    /// 单次送入的最大字节数
    pub fn burst_bytes(&self) -> u64 {
        self.burst_bytes
    }

    /// 累计的逐帧检查统计
    pub fn inspect_params(&self) -> &InspectParams {
        self.stats.params()
    }

    /// 因分辨率未知而未统计的帧数
    pub fn skipped_frames(&self) -> u32 {
        self.stats.skipped_frames()
    }

    fn ensure_open(&self, op: &str) -> ConformResult<()> {
        match self.state {
            SessionState::Uninitialized | SessionState::Closed => Err(ConformError::InvalidParam(
                format!("{}: 会话状态 {:?} 不可用", op, self.state),
            )),
            _ => Ok(()),
        }
    }
}

impl Drop for RefDecoder {
    fn drop(&mut self) {
        self.close();
    }
}

/// 引擎图像格式到像素格式的映射, 未知格式按 4:2:2 处理
fn translate_format(format: EngineImageFormat) -> PixelFormat {
    match format {
        EngineImageFormat::Yv12 => PixelFormat::Yv12,
        EngineImageFormat::I420 => PixelFormat::Yuv420p,
        EngineImageFormat::AomYv12 => PixelFormat::Yv12Custom,
        EngineImageFormat::AomI420 => PixelFormat::Yuv420pCustom,
        EngineImageFormat::I422 => PixelFormat::Yuv422p,
        EngineImageFormat::I444 => PixelFormat::Yuv444p,
        EngineImageFormat::I444a => PixelFormat::Yuva444p,
        EngineImageFormat::I42016 => PixelFormat::Yuv420p10,
        EngineImageFormat::I42216 => PixelFormat::Yuv422p10,
        EngineImageFormat::I44416 => PixelFormat::Yuv444p10,
        EngineImageFormat::Other(raw) => {
            warn!("未知的引擎图像格式 0x{:x}, 按 4:2:2 处理", raw);
            PixelFormat::Yuv422p
        }
    }
}
