//! 集成测试公共工具: 按脚本回放的模拟解码引擎与码流构造函数.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use conform_codec::block::BlockSize;
use conform_codec::engine::{
    Av1Engine, EngineError, EngineErrorKind, EngineImage, EngineImageFormat,
};
use conform_codec::inspect::{FrameInspection, FrameType, InspectionSink, MiInfo, mi_grid_dims};
use conform_codec::parsers::av1::{ObuType, build_obu};
use conform_core::bitwriter::BitWriter;

/// 一帧的脚本
#[derive(Debug, Clone)]
pub struct ScriptedFrame {
    pub frame_type: FrameType,
    pub base_qindex: u32,
    /// 按行优先顺序循环填充 mi 网格的块尺寸
    pub blocks: Vec<BlockSize>,
    /// 块级 qindex
    pub block_qindex: i32,
    pub tile_mi_rows: u32,
    pub tile_mi_cols: u32,
    pub width: u32,
    pub height: u32,
    pub format: EngineImageFormat,
}

impl ScriptedFrame {
    pub fn new(frame_type: FrameType, base_qindex: u32, block: BlockSize) -> Self {
        Self {
            frame_type,
            base_qindex,
            blocks: vec![block],
            block_qindex: base_qindex as i32,
            tile_mi_rows: 16,
            tile_mi_cols: 16,
            width: 64,
            height: 64,
            format: EngineImageFormat::I420,
        }
    }

    pub fn with_blocks(mut self, blocks: &[BlockSize]) -> Self {
        self.blocks = blocks.to_vec();
        self
    }

    pub fn with_tiles(mut self, tile_mi_rows: u32, tile_mi_cols: u32) -> Self {
        self.tile_mi_rows = tile_mi_rows;
        self.tile_mi_cols = tile_mi_cols;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_format(mut self, format: EngineImageFormat) -> Self {
        self.format = format;
        self
    }

    fn mi_dims(&self) -> (u32, u32) {
        mi_grid_dims(self.width, self.height)
    }

    fn grid(&self) -> Vec<MiInfo> {
        let (rows, cols) = self.mi_dims();
        (0..(rows * cols) as usize)
            .map(|i| MiInfo {
                block_size: self.blocks[i % self.blocks.len()] as u8,
                current_qindex: self.block_qindex,
            })
            .collect()
    }

    fn image(&self) -> EngineImage {
        let high = self.format.is_high_bitdepth();
        let bytes_per_sample = if high { 2 } else { 1 };
        let luma_stride = self.width as usize * bytes_per_sample;
        let chroma_stride = luma_stride.div_ceil(2);
        let luma = vec![0x80u8; luma_stride * self.height as usize];
        let chroma = vec![0x80u8; chroma_stride * self.height.div_ceil(2) as usize];
        EngineImage {
            format: self.format,
            width: self.width,
            height: self.height,
            display_width: self.width,
            display_height: self.height,
            // 与格式标志不一致的位深, 由适配层修正
            bit_depth: 8,
            stride: vec![luma_stride, chroma_stride, chroma_stride],
            planes: vec![
                Bytes::from(luma),
                Bytes::from(chroma.clone()),
                Bytes::from(chroma),
            ],
        }
    }
}

/// decode() 每次调用消耗一步
#[derive(Debug, Clone)]
pub enum Step {
    /// 完成一帧: 回调检查记录并排队一张图像
    Frame(ScriptedFrame),
    /// 吞下数据但不输出帧
    Hold,
    /// 返回引擎错误
    Fail(EngineErrorKind),
}

/// 引擎调用记录, 测试结束后仍可读取
#[derive(Debug, Default)]
pub struct EngineLog {
    pub init_calls: u32,
    pub destroy_calls: u32,
    pub decode_calls: u32,
    pub inspections_delivered: u32,
    pub bytes_seen: u64,
}

/// 按脚本回放的模拟引擎
pub struct ScriptedEngine {
    steps: VecDeque<Step>,
    images: VecDeque<EngineImage>,
    inspection: bool,
    fail_init: Option<EngineErrorKind>,
    refuse_inspection: bool,
    log: Arc<Mutex<EngineLog>>,
}

impl ScriptedEngine {
    pub fn new(steps: Vec<Step>) -> (Self, Arc<Mutex<EngineLog>>) {
        let log = Arc::new(Mutex::new(EngineLog::default()));
        let engine = Self {
            steps: steps.into(),
            images: VecDeque::new(),
            inspection: false,
            fail_init: None,
            refuse_inspection: false,
            log: Arc::clone(&log),
        };
        (engine, log)
    }

    pub fn failing_init(mut self, kind: EngineErrorKind) -> Self {
        self.fail_init = Some(kind);
        self
    }

    pub fn refusing_inspection(mut self) -> Self {
        self.refuse_inspection = true;
        self
    }

    pub fn boxed(self) -> Box<dyn Av1Engine> {
        Box::new(self)
    }
}

impl Av1Engine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn init(&mut self) -> Result<(), EngineError> {
        self.log.lock().unwrap().init_calls += 1;
        match self.fail_init {
            Some(kind) => Err(EngineError::new(kind, "scripted init failure")),
            None => Ok(()),
        }
    }

    fn enable_inspection(&mut self) -> Result<(), EngineError> {
        if self.refuse_inspection {
            return Err(EngineError::new(
                EngineErrorKind::Incapable,
                "inspection not built in",
            ));
        }
        self.inspection = true;
        Ok(())
    }

    fn decode(
        &mut self,
        data: &[u8],
        inspector: Option<&mut dyn InspectionSink>,
    ) -> Result<(), EngineError> {
        let mut log = self.log.lock().unwrap();
        log.decode_calls += 1;
        match self.steps.pop_front().unwrap_or(Step::Hold) {
            Step::Fail(kind) => Err(EngineError::new(kind, "scripted decode failure")),
            Step::Hold => {
                log.bytes_seen += data.len() as u64;
                Ok(())
            }
            Step::Frame(frame) => {
                log.bytes_seen += data.len() as u64;
                if let (true, Some(sink)) = (self.inspection, inspector) {
                    let grid = frame.grid();
                    let (mi_rows, mi_cols) = frame.mi_dims();
                    sink.on_frame(&FrameInspection {
                        frame_type: frame.frame_type,
                        base_qindex: frame.base_qindex,
                        tile_mi_rows: frame.tile_mi_rows,
                        tile_mi_cols: frame.tile_mi_cols,
                        mi_rows,
                        mi_cols,
                        mi_grid: &grid,
                    });
                    log.inspections_delivered += 1;
                }
                self.images.push_back(frame.image());
                Ok(())
            }
        }
    }

    fn next_image(&mut self) -> Option<EngineImage> {
        self.images.pop_front()
    }

    fn destroy(&mut self) {
        self.log.lock().unwrap().destroy_calls += 1;
        self.images.clear();
    }
}

/// 写出 profile 0 序列头负载 (含 trailing bits)
pub fn sequence_header_payload(width: u32, height: u32, seq_level_idx: u32) -> Vec<u8> {
    let w_bits = u32::BITS - (width - 1).leading_zeros().min(31);
    let h_bits = u32::BITS - (height - 1).leading_zeros().min(31);

    let mut bw = BitWriter::new();
    bw.write_bits(0, 3); // seq_profile
    bw.write_flag(false); // still_picture
    bw.write_flag(false); // reduced_still_picture_header
    bw.write_flag(false); // timing_info_present_flag
    bw.write_flag(false); // initial_display_delay_present_flag
    bw.write_bits(0, 5); // operating_points_cnt_minus_1
    bw.write_bits(0, 12); // operating_point_idc[0]
    bw.write_bits(seq_level_idx, 5);
    if seq_level_idx > 7 {
        bw.write_bits(0, 1); // seq_tier[0]
    }
    bw.write_bits(w_bits - 1, 4);
    bw.write_bits(h_bits - 1, 4);
    bw.write_bits(width - 1, w_bits);
    bw.write_bits(height - 1, h_bits);
    bw.write_flag(false); // frame_id_numbers_present_flag
    bw.write_flag(false); // use_128x128_superblock
    bw.write_flag(true); // enable_filter_intra
    bw.write_flag(true); // enable_intra_edge_filter
    bw.write_flag(true); // enable_interintra_compound
    bw.write_flag(true); // enable_masked_compound
    bw.write_flag(true); // enable_warped_motion
    bw.write_flag(false); // enable_dual_filter
    bw.write_flag(true); // enable_order_hint
    bw.write_flag(true); // enable_jnt_comp
    bw.write_flag(true); // enable_ref_frame_mvs
    bw.write_flag(false); // seq_choose_screen_content_tools
    bw.write_flag(true); // seq_force_screen_content_tools
    bw.write_flag(false); // seq_choose_integer_mv
    bw.write_flag(true); // seq_force_integer_mv
    bw.write_bits(6, 3); // order_hint_bits_minus_1
    bw.write_flag(false); // enable_superres
    bw.write_flag(true); // enable_cdef
    bw.write_flag(true); // enable_restoration
    bw.write_flag(false); // high_bitdepth
    bw.write_flag(false); // mono_chrome
    bw.write_flag(true); // color_description_present_flag
    bw.write_bits(1, 8); // color_primaries (BT.709)
    bw.write_bits(1, 8); // transfer_characteristics (BT.709)
    bw.write_bits(1, 8); // matrix_coefficients (BT.709)
    bw.write_flag(false); // color_range
    bw.write_bits(0, 2); // chroma_sample_position
    bw.write_flag(false); // separate_uv_delta_q
    bw.write_flag(false); // film_grain_params_present
    bw.write_bit(1); // trailing_one_bit
    bw.finish()
}

/// 构造一个时间单元: TD + 可选序列头 + 帧 OBU, 总长度补足到 `frame_size`
pub fn temporal_unit(sequence_header: Option<&[u8]>, frame_size: usize) -> Vec<u8> {
    let mut data = build_obu(ObuType::TemporalDelimiter, &[]);
    if let Some(payload) = sequence_header {
        data.extend(build_obu(ObuType::SequenceHeader, payload));
    }
    // 帧 OBU 头 1 字节 + leb128 长度, 负载长度按剩余空间估算
    let mut payload_len = frame_size.saturating_sub(data.len() + 2);
    loop {
        let obu = build_obu(ObuType::Frame, &vec![0x5A; payload_len]);
        if data.len() + obu.len() <= frame_size || payload_len == 0 {
            data.extend(obu);
            break;
        }
        payload_len -= 1;
    }
    data
}
