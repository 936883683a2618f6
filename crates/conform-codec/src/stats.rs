//! 帧统计累加器.
//!
//! 每收到一帧检查记录, 先复制到检查缓冲区, 再折算成一份 [`FrameContribution`],
//! 最后通过一组归约函数并入整条码流的 [`InspectParams`].

use log::{debug, trace, warn};

use crate::block::{BlockSize, SUPERBLOCK_SIZE};
use crate::inspect::{FrameInspection, FrameType, InspectionFrame, InspectionSink};
use crate::quantizer::MAX_QINDEX;

/// 整条码流的检查统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectParams {
    /// 按解码顺序记录的帧类型
    pub frame_type_list: Vec<FrameType>,
    /// 最近一帧的 tile 行数
    pub tile_rows: u32,
    /// 最近一帧的 tile 列数
    pub tile_cols: u32,
    /// 观察到的最小块边长, 只减不增
    pub min_block_size: u32,
    /// 是否出现过扩展 (非方形) 块, 一旦置位不再清除
    pub ext_block_flag: bool,
    /// 按解码顺序记录的帧级基础量化索引
    pub qindex_list: Vec<u32>,
    /// 帧级基础量化索引最大值
    pub max_qindex: u32,
    /// 帧级基础量化索引最小值
    pub min_qindex: u32,
}

impl Default for InspectParams {
    fn default() -> Self {
        Self {
            frame_type_list: Vec::new(),
            tile_rows: 0,
            tile_cols: 0,
            min_block_size: SUPERBLOCK_SIZE,
            ext_block_flag: false,
            qindex_list: Vec::new(),
            max_qindex: 0,
            min_qindex: MAX_QINDEX,
        }
    }
}

/// 块级量化索引范围 (仅在帧内统计, 不并入码流级指标)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QindexRange {
    pub min: i32,
    pub max: i32,
}

impl Default for QindexRange {
    fn default() -> Self {
        Self {
            min: MAX_QINDEX as i32,
            max: 0,
        }
    }
}

impl QindexRange {
    fn include(self, qindex: i32) -> Self {
        Self {
            min: self.min.min(qindex),
            max: self.max.max(qindex),
        }
    }
}

/// 单帧对统计的贡献
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameContribution {
    pub frame_type: FrameType,
    pub base_qindex: u32,
    pub tile_rows: u32,
    pub tile_cols: u32,
    /// 本帧最小块边长, 无块时为 128
    pub min_block_size: u32,
    /// 本帧是否含扩展块
    pub has_ext_block: bool,
    /// 本帧块级量化索引范围
    pub block_qindex: QindexRange,
}

impl FrameContribution {
    /// 扫描检查缓冲区中的一帧
    ///
    /// 非法的块尺寸枚举值会直接终止 (与解码器枚举失配).
    pub fn scan(frame: &InspectionFrame) -> Self {
        let mut min_block_size = SUPERBLOCK_SIZE;
        let mut has_ext_block = false;
        let mut block_qindex = QindexRange::default();

        for mi in frame.cells() {
            let bs = BlockSize::from_raw_checked(mi.block_size);
            min_block_size = reduce_min_block_size(min_block_size, bs.min_side_length());
            if !has_ext_block {
                has_ext_block = bs.is_extended();
            }
            block_qindex = block_qindex.include(mi.current_qindex);
        }

        Self {
            frame_type: frame.frame_type,
            base_qindex: frame.base_qindex,
            tile_rows: frame.tile_mi_rows,
            tile_cols: frame.tile_mi_cols,
            min_block_size,
            has_ext_block,
            block_qindex,
        }
    }
}

/// 最小块边长归约
pub fn reduce_min_block_size(current: u32, frame: u32) -> u32 {
    current.min(frame)
}

/// 扩展块标志归约 (粘滞)
pub fn reduce_ext_block_flag(current: bool, frame: bool) -> bool {
    current || frame
}

/// 最大量化索引归约
pub fn reduce_max_qindex(current: u32, frame: u32) -> u32 {
    current.max(frame)
}

/// 最小量化索引归约
pub fn reduce_min_qindex(current: u32, frame: u32) -> u32 {
    current.min(frame)
}

impl InspectParams {
    /// 并入一帧的贡献
    pub fn apply(&mut self, frame: &FrameContribution) {
        self.tile_rows = frame.tile_rows;
        self.tile_cols = frame.tile_cols;
        self.frame_type_list.push(frame.frame_type);
        self.min_block_size = reduce_min_block_size(self.min_block_size, frame.min_block_size);
        self.ext_block_flag = reduce_ext_block_flag(self.ext_block_flag, frame.has_ext_block);
        self.qindex_list.push(frame.base_qindex);
        self.max_qindex = reduce_max_qindex(self.max_qindex, frame.base_qindex);
        self.min_qindex = reduce_min_qindex(self.min_qindex, frame.base_qindex);
    }

    /// 已统计的帧数
    pub fn frame_count(&self) -> usize {
        self.frame_type_list.len()
    }
}

/// 帧统计累加器
///
/// 作为检查回调的接收方挂到解码器上. 检查缓冲区在首次回调且分辨率已知时分配,
/// 分辨率未知时该帧被跳过, 统计序列中留下空缺.
#[derive(Debug, Default)]
pub struct FrameStatsAccumulator {
    /// 码流分辨率 (宽, 高), 0 表示未知
    resolution: (u32, u32),
    /// 检查缓冲区
    buffer: Option<InspectionFrame>,
    /// 累计统计
    params: InspectParams,
    /// 因缓冲区不可用而跳过的帧数
    skipped_frames: u32,
}

impl FrameStatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置码流分辨率, 缓冲区分配前有效
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.resolution = (width, height);
    }

    /// 累计统计
    pub fn params(&self) -> &InspectParams {
        &self.params
    }

    /// 被跳过的帧数
    pub fn skipped_frames(&self) -> u32 {
        self.skipped_frames
    }

    /// 检查缓冲区是否已分配
    pub fn has_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    /// 释放检查缓冲区
    pub fn release(&mut self) {
        self.buffer = None;
    }

    fn ensure_buffer(&mut self) -> Option<&mut InspectionFrame> {
        if self.buffer.is_none() {
            let (width, height) = self.resolution;
            if width == 0 {
                return None;
            }
            match InspectionFrame::new(width, height) {
                Ok(buf) => {
                    debug!("分配检查缓冲区: {}x{}", width, height);
                    self.buffer = Some(buf);
                }
                Err(e) => {
                    warn!("检查缓冲区分配失败: {}", e);
                    return None;
                }
            }
        }
        self.buffer.as_mut()
    }
}

impl InspectionSink for FrameStatsAccumulator {
    fn on_frame(&mut self, record: &FrameInspection<'_>) {
        let Some(buffer) = self.ensure_buffer() else {
            warn!("检查缓冲区未就绪, 跳过该帧 (类型 {:?})", record.frame_type);
            self.skipped_frames += 1;
            return;
        };
        buffer.fill_from(record);

        let contribution = FrameContribution::scan(buffer);
        trace!(
            "帧 #{}: 类型={:?}, base_qindex={}, 最小块={}, 扩展块={}, 块级 qindex=[{}, {}]",
            self.params.frame_count(),
            contribution.frame_type,
            contribution.base_qindex,
            contribution.min_block_size,
            contribution.has_ext_block,
            contribution.block_qindex.min,
            contribution.block_qindex.max,
        );
        self.params.apply(&contribution);
    }
}
