//! sequence_header_obu 解析.
//!
//! 语法参见 AV1 规范 5.5 节. 解析结果以语法元素名称对外提供,
//! 取值统一转为十进制字符串.

use conform_core::bitreader::BitReader;
use conform_core::{ConformError, ConformResult};

/// seq_force_screen_content_tools / seq_force_integer_mv 的 "由帧头选择" 取值
pub const SELECT: u8 = 2;

/// 未指定的色彩描述 (CP_UNSPECIFIED / TC_UNSPECIFIED / MC_UNSPECIFIED)
const COLOR_UNSPECIFIED: u8 = 2;
const CP_BT_709: u8 = 1;
const TC_SRGB: u8 = 13;
const MC_IDENTITY: u8 = 0;

/// timing_info()
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimingInfo {
    pub num_units_in_display_tick: u32,
    pub time_scale: u32,
    pub equal_picture_interval: bool,
    /// 仅当 equal_picture_interval 为真时有效
    pub num_ticks_per_picture_minus_1: u32,
}

/// decoder_model_info()
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderModelInfo {
    pub buffer_delay_length_minus_1: u8,
    pub num_units_in_decoding_tick: u32,
    pub buffer_removal_time_length_minus_1: u8,
    pub frame_presentation_time_length_minus_1: u8,
}

/// 单个操作点
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperatingPoint {
    pub idc: u16,
    pub seq_level_idx: u8,
    pub seq_tier: u8,
    pub decoder_model_present: bool,
    pub decoder_buffer_delay: u32,
    pub encoder_buffer_delay: u32,
    pub low_delay_mode_flag: bool,
    pub initial_display_delay_present: bool,
    pub initial_display_delay_minus_1: u8,
}

/// color_config()
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    pub bit_depth: u8,
    pub mono_chrome: bool,
    pub color_description_present_flag: bool,
    pub color_primaries: u8,
    pub transfer_characteristics: u8,
    pub matrix_coefficients: u8,
    pub color_range: bool,
    pub subsampling_x: bool,
    pub subsampling_y: bool,
    pub chroma_sample_position: u8,
    pub separate_uv_delta_q: bool,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            bit_depth: 8,
            mono_chrome: false,
            color_description_present_flag: false,
            color_primaries: COLOR_UNSPECIFIED,
            transfer_characteristics: COLOR_UNSPECIFIED,
            matrix_coefficients: COLOR_UNSPECIFIED,
            color_range: false,
            subsampling_x: true,
            subsampling_y: true,
            chroma_sample_position: 0,
            separate_uv_delta_q: false,
        }
    }
}

impl ColorConfig {
    fn parse(br: &mut BitReader<'_>, seq_profile: u8) -> ConformResult<Self> {
        let mut cc = Self::default();

        let high_bitdepth = br.read_flag()?;
        cc.bit_depth = if seq_profile == 2 && high_bitdepth {
            if br.read_flag()? { 12 } else { 10 }
        } else if high_bitdepth {
            10
        } else {
            8
        };

        cc.mono_chrome = if seq_profile == 1 {
            false
        } else {
            br.read_flag()?
        };

        cc.color_description_present_flag = br.read_flag()?;
        if cc.color_description_present_flag {
            cc.color_primaries = br.read_bits(8)? as u8;
            cc.transfer_characteristics = br.read_bits(8)? as u8;
            cc.matrix_coefficients = br.read_bits(8)? as u8;
        }

        if cc.mono_chrome {
            cc.color_range = br.read_flag()?;
            cc.subsampling_x = true;
            cc.subsampling_y = true;
            return Ok(cc);
        }

        if cc.color_primaries == CP_BT_709
            && cc.transfer_characteristics == TC_SRGB
            && cc.matrix_coefficients == MC_IDENTITY
        {
            cc.color_range = true;
            cc.subsampling_x = false;
            cc.subsampling_y = false;
        } else {
            cc.color_range = br.read_flag()?;
            match seq_profile {
                0 => {
                    cc.subsampling_x = true;
                    cc.subsampling_y = true;
                }
                1 => {
                    cc.subsampling_x = false;
                    cc.subsampling_y = false;
                }
                _ => {
                    if cc.bit_depth == 12 {
                        cc.subsampling_x = br.read_flag()?;
                        cc.subsampling_y = if cc.subsampling_x {
                            br.read_flag()?
                        } else {
                            false
                        };
                    } else {
                        cc.subsampling_x = true;
                        cc.subsampling_y = false;
                    }
                }
            }
            if cc.subsampling_x && cc.subsampling_y {
                cc.chroma_sample_position = br.read_bits(2)? as u8;
            }
        }

        cc.separate_uv_delta_q = br.read_flag()?;
        Ok(cc)
    }
}

/// 解析后的序列头
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceHeader {
    pub seq_profile: u8,
    pub still_picture: bool,
    pub reduced_still_picture_header: bool,
    pub timing_info: Option<TimingInfo>,
    pub decoder_model_info: Option<DecoderModelInfo>,
    pub initial_display_delay_present_flag: bool,
    pub operating_points: Vec<OperatingPoint>,
    pub frame_width_bits_minus_1: u8,
    pub frame_height_bits_minus_1: u8,
    pub max_frame_width_minus_1: u32,
    pub max_frame_height_minus_1: u32,
    pub frame_id_numbers_present_flag: bool,
    pub delta_frame_id_length_minus_2: u8,
    pub additional_frame_id_length_minus_1: u8,
    pub use_128x128_superblock: bool,
    pub enable_filter_intra: bool,
    pub enable_intra_edge_filter: bool,
    pub enable_interintra_compound: bool,
    pub enable_masked_compound: bool,
    pub enable_warped_motion: bool,
    pub enable_dual_filter: bool,
    pub enable_order_hint: bool,
    pub enable_jnt_comp: bool,
    pub enable_ref_frame_mvs: bool,
    /// 0, 1 或 [`SELECT`]
    pub seq_force_screen_content_tools: u8,
    /// 0, 1 或 [`SELECT`]
    pub seq_force_integer_mv: u8,
    pub order_hint_bits: u8,
    pub enable_superres: bool,
    pub enable_cdef: bool,
    pub enable_restoration: bool,
    pub color_config: ColorConfig,
    pub film_grain_params_present: bool,
}

impl SequenceHeader {
    /// 从 OBU 负载解析序列头
    pub fn parse(payload: &[u8]) -> ConformResult<Self> {
        let mut br = BitReader::new(payload);
        let mut sh = Self {
            seq_profile: br.read_bits(3)? as u8,
            still_picture: br.read_flag()?,
            reduced_still_picture_header: br.read_flag()?,
            ..Self::default()
        };

        if sh.reduced_still_picture_header {
            let seq_level_idx = br.read_bits(5)? as u8;
            sh.operating_points.push(OperatingPoint {
                seq_level_idx,
                ..OperatingPoint::default()
            });
        } else {
            sh.parse_operating_points(&mut br)?;
        }

        sh.frame_width_bits_minus_1 = br.read_bits(4)? as u8;
        sh.frame_height_bits_minus_1 = br.read_bits(4)? as u8;
        sh.max_frame_width_minus_1 = br.read_bits(u32::from(sh.frame_width_bits_minus_1) + 1)?;
        sh.max_frame_height_minus_1 =
            br.read_bits(u32::from(sh.frame_height_bits_minus_1) + 1)?;

        if !sh.reduced_still_picture_header {
            sh.frame_id_numbers_present_flag = br.read_flag()?;
        }
        if sh.frame_id_numbers_present_flag {
            sh.delta_frame_id_length_minus_2 = br.read_bits(4)? as u8;
            sh.additional_frame_id_length_minus_1 = br.read_bits(3)? as u8;
        }

        sh.use_128x128_superblock = br.read_flag()?;
        sh.enable_filter_intra = br.read_flag()?;
        sh.enable_intra_edge_filter = br.read_flag()?;

        if sh.reduced_still_picture_header {
            sh.seq_force_screen_content_tools = SELECT;
            sh.seq_force_integer_mv = SELECT;
        } else {
            sh.parse_inter_tools(&mut br)?;
        }

        sh.enable_superres = br.read_flag()?;
        sh.enable_cdef = br.read_flag()?;
        sh.enable_restoration = br.read_flag()?;
        sh.color_config = ColorConfig::parse(&mut br, sh.seq_profile)?;
        sh.film_grain_params_present = br.read_flag()?;

        if sh.seq_profile > 2 {
            return Err(ConformError::UnsupBitstream(format!(
                "序列头: seq_profile={} 为保留值",
                sh.seq_profile
            )));
        }
        Ok(sh)
    }

    fn parse_operating_points(&mut self, br: &mut BitReader<'_>) -> ConformResult<()> {
        if br.read_flag()? {
            let mut timing = TimingInfo {
                num_units_in_display_tick: br.read_bits(32)?,
                time_scale: br.read_bits(32)?,
                equal_picture_interval: br.read_flag()?,
                ..TimingInfo::default()
            };
            if timing.equal_picture_interval {
                timing.num_ticks_per_picture_minus_1 = br.read_uvlc()?;
            }
            self.timing_info = Some(timing);

            if br.read_flag()? {
                self.decoder_model_info = Some(DecoderModelInfo {
                    buffer_delay_length_minus_1: br.read_bits(5)? as u8,
                    num_units_in_decoding_tick: br.read_bits(32)?,
                    buffer_removal_time_length_minus_1: br.read_bits(5)? as u8,
                    frame_presentation_time_length_minus_1: br.read_bits(5)? as u8,
                });
            }
        }

        self.initial_display_delay_present_flag = br.read_flag()?;
        let count = br.read_bits(5)? + 1;
        for _ in 0..count {
            let mut op = OperatingPoint {
                idc: br.read_bits(12)? as u16,
                seq_level_idx: br.read_bits(5)? as u8,
                ..OperatingPoint::default()
            };
            if op.seq_level_idx > 7 {
                op.seq_tier = br.read_bits(1)? as u8;
            }
            if let Some(model) = self.decoder_model_info {
                op.decoder_model_present = br.read_flag()?;
                if op.decoder_model_present {
                    let n = u32::from(model.buffer_delay_length_minus_1) + 1;
                    op.decoder_buffer_delay = br.read_bits(n)?;
                    op.encoder_buffer_delay = br.read_bits(n)?;
                    op.low_delay_mode_flag = br.read_flag()?;
                }
            }
            if self.initial_display_delay_present_flag {
                op.initial_display_delay_present = br.read_flag()?;
                if op.initial_display_delay_present {
                    op.initial_display_delay_minus_1 = br.read_bits(4)? as u8;
                }
            }
            self.operating_points.push(op);
        }
        Ok(())
    }

    fn parse_inter_tools(&mut self, br: &mut BitReader<'_>) -> ConformResult<()> {
        self.enable_interintra_compound = br.read_flag()?;
        self.enable_masked_compound = br.read_flag()?;
        self.enable_warped_motion = br.read_flag()?;
        self.enable_dual_filter = br.read_flag()?;
        self.enable_order_hint = br.read_flag()?;
        if self.enable_order_hint {
            self.enable_jnt_comp = br.read_flag()?;
            self.enable_ref_frame_mvs = br.read_flag()?;
        }

        self.seq_force_screen_content_tools = if br.read_flag()? {
            SELECT
        } else {
            br.read_bits(1)? as u8
        };

        self.seq_force_integer_mv = if self.seq_force_screen_content_tools > 0 {
            if br.read_flag()? {
                SELECT
            } else {
                br.read_bits(1)? as u8
            }
        } else {
            SELECT
        };

        if self.enable_order_hint {
            self.order_hint_bits = br.read_bits(3)? as u8 + 1;
        }
        Ok(())
    }

    /// 最大帧宽
    pub fn max_frame_width(&self) -> u32 {
        self.max_frame_width_minus_1 + 1
    }

    /// 最大帧高
    pub fn max_frame_height(&self) -> u32 {
        self.max_frame_height_minus_1 + 1
    }

    /// 按语法元素名称取值
    ///
    /// 与操作点相关的元素取操作点 0. 未知名称返回 `None`.
    pub fn syntax_element(&self, name: &str) -> Option<String> {
        let op0 = self.operating_points.first().copied().unwrap_or_default();
        let timing = self.timing_info.unwrap_or_default();
        let cc = &self.color_config;
        let flag = |b: bool| u32::from(b).to_string();

        let value = match name {
            "seq_profile" => self.seq_profile.to_string(),
            "still_picture" => flag(self.still_picture),
            "reduced_still_picture_header" => flag(self.reduced_still_picture_header),
            "timing_info_present_flag" => flag(self.timing_info.is_some()),
            "num_units_in_display_tick" => timing.num_units_in_display_tick.to_string(),
            "time_scale" => timing.time_scale.to_string(),
            "equal_picture_interval" => flag(timing.equal_picture_interval),
            "num_ticks_per_picture_minus_1" => timing.num_ticks_per_picture_minus_1.to_string(),
            "decoder_model_info_present_flag" => flag(self.decoder_model_info.is_some()),
            "initial_display_delay_present_flag" => {
                flag(self.initial_display_delay_present_flag)
            }
            "operating_points_cnt_minus_1" => {
                self.operating_points.len().saturating_sub(1).to_string()
            }
            "operating_point_idc" => op0.idc.to_string(),
            "seq_level_idx" => op0.seq_level_idx.to_string(),
            "seq_tier" => op0.seq_tier.to_string(),
            "frame_width_bits_minus_1" => self.frame_width_bits_minus_1.to_string(),
            "frame_height_bits_minus_1" => self.frame_height_bits_minus_1.to_string(),
            "max_frame_width_minus_1" => self.max_frame_width_minus_1.to_string(),
            "max_frame_height_minus_1" => self.max_frame_height_minus_1.to_string(),
            "frame_id_numbers_present_flag" => flag(self.frame_id_numbers_present_flag),
            "delta_frame_id_length_minus_2" => self.delta_frame_id_length_minus_2.to_string(),
            "additional_frame_id_length_minus_1" => {
                self.additional_frame_id_length_minus_1.to_string()
            }
            "use_128x128_superblock" => flag(self.use_128x128_superblock),
            "enable_filter_intra" => flag(self.enable_filter_intra),
            "enable_intra_edge_filter" => flag(self.enable_intra_edge_filter),
            "enable_interintra_compound" => flag(self.enable_interintra_compound),
            "enable_masked_compound" => flag(self.enable_masked_compound),
            "enable_warped_motion" => flag(self.enable_warped_motion),
            "enable_dual_filter" => flag(self.enable_dual_filter),
            "enable_order_hint" => flag(self.enable_order_hint),
            "enable_jnt_comp" => flag(self.enable_jnt_comp),
            "enable_ref_frame_mvs" => flag(self.enable_ref_frame_mvs),
            "seq_force_screen_content_tools" => self.seq_force_screen_content_tools.to_string(),
            "seq_force_integer_mv" => self.seq_force_integer_mv.to_string(),
            "order_hint_bits" => self.order_hint_bits.to_string(),
            "enable_superres" => flag(self.enable_superres),
            "enable_cdef" => flag(self.enable_cdef),
            "enable_restoration" => flag(self.enable_restoration),
            "bit_depth" => cc.bit_depth.to_string(),
            "mono_chrome" => flag(cc.mono_chrome),
            "color_description_present_flag" => flag(cc.color_description_present_flag),
            "color_primaries" => cc.color_primaries.to_string(),
            "transfer_characteristics" => cc.transfer_characteristics.to_string(),
            "matrix_coefficients" => cc.matrix_coefficients.to_string(),
            "color_range" => flag(cc.color_range),
            "subsampling_x" => flag(cc.subsampling_x),
            "subsampling_y" => flag(cc.subsampling_y),
            "chroma_sample_position" => cc.chroma_sample_position.to_string(),
            "separate_uv_delta_q" => flag(cc.separate_uv_delta_q),
            "film_grain_params_present" => flag(self.film_grain_params_present),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use conform_core::bitwriter::BitWriter;

    /// 写出 8-bit 4:2:0 profile 0 序列头, 无 timing info, 单操作点
    pub(crate) fn write_main_profile_header(width: u32, height: u32, level: u32) -> Vec<u8> {
        let mut bw = BitWriter::new();
        bw.write_bits(0, 3); // seq_profile
        bw.write_flag(false); // still_picture
        bw.write_flag(false); // reduced_still_picture_header
        bw.write_flag(false); // timing_info_present_flag
        bw.write_flag(false); // initial_display_delay_present_flag
        bw.write_bits(0, 5); // operating_points_cnt_minus_1
        bw.write_bits(0, 12);
        bw.write_bits(level, 5);
        if level > 7 {
            bw.write_bits(1, 1); // seq_tier
        }

        let w_bits = 32 - (width - 1).leading_zeros().min(31);
        let h_bits = 32 - (height - 1).leading_zeros().min(31);
        bw.write_bits(w_bits - 1, 4);
        bw.write_bits(h_bits - 1, 4);
        bw.write_bits(width - 1, w_bits);
        bw.write_bits(height - 1, h_bits);

        bw.write_flag(false); // frame_id_numbers_present_flag
        bw.write_flag(true); // use_128x128_superblock
        bw.write_flag(true); // enable_filter_intra
        bw.write_flag(true); // enable_intra_edge_filter
        bw.write_flag(false); // enable_interintra_compound
        bw.write_flag(true); // enable_masked_compound
        bw.write_flag(false); // enable_warped_motion
        bw.write_flag(true); // enable_dual_filter
        bw.write_flag(true); // enable_order_hint
        bw.write_flag(true); // enable_jnt_comp
        bw.write_flag(false); // enable_ref_frame_mvs
        bw.write_flag(true); // seq_choose_screen_content_tools
        bw.write_flag(true); // seq_choose_integer_mv
        bw.write_bits(6, 3); // order_hint_bits_minus_1
        bw.write_flag(false); // enable_superres
        bw.write_flag(true); // enable_cdef
        bw.write_flag(true); // enable_restoration

        bw.write_flag(false); // high_bitdepth
        bw.write_flag(false); // mono_chrome
        bw.write_flag(false); // color_description_present_flag
        bw.write_flag(false); // color_range
        bw.write_bits(1, 2); // chroma_sample_position
        bw.write_flag(false); // separate_uv_delta_q
        bw.write_flag(false); // film_grain_params_present
        bw.write_bit(1); // trailing_one_bit
        bw.finish()
    }

    #[test]
    fn test_parse_main_profile_header() {
        let payload = write_main_profile_header(1920, 1080, 8);
        let sh = SequenceHeader::parse(&payload).unwrap();

        assert_eq!(sh.seq_profile, 0);
        assert!(sh.timing_info.is_none());
        assert_eq!(sh.operating_points.len(), 1);
        assert_eq!(sh.operating_points[0].seq_level_idx, 8);
        assert_eq!(sh.operating_points[0].seq_tier, 1);
        assert_eq!(sh.max_frame_width(), 1920);
        assert_eq!(sh.max_frame_height(), 1080);
        assert!(sh.use_128x128_superblock);
        assert!(sh.enable_order_hint && sh.enable_jnt_comp && !sh.enable_ref_frame_mvs);
        assert_eq!(sh.seq_force_screen_content_tools, SELECT);
        assert_eq!(sh.seq_force_integer_mv, SELECT);
        assert_eq!(sh.order_hint_bits, 7);
        assert_eq!(sh.color_config.bit_depth, 8);
        assert!(sh.color_config.subsampling_x && sh.color_config.subsampling_y);
        assert_eq!(sh.color_config.chroma_sample_position, 1);
        assert_eq!(sh.color_config.color_primaries, COLOR_UNSPECIFIED);
    }

    #[test]
    fn test_low_level_has_no_tier_bit() {
        let payload = write_main_profile_header(352, 288, 4);
        let sh = SequenceHeader::parse(&payload).unwrap();
        assert_eq!(sh.operating_points[0].seq_level_idx, 4);
        assert_eq!(sh.operating_points[0].seq_tier, 0);
        assert_eq!(sh.max_frame_width(), 352);
        assert_eq!(sh.max_frame_height(), 288);
    }

    #[test]
    fn test_reduced_still_picture_header() {
        let mut bw = BitWriter::new();
        bw.write_bits(1, 3); // seq_profile = 1 (4:4:4)
        bw.write_flag(true); // still_picture
        bw.write_flag(true); // reduced_still_picture_header
        bw.write_bits(5, 5); // seq_level_idx
        bw.write_bits(7, 4);
        bw.write_bits(7, 4);
        bw.write_bits(255, 8);
        bw.write_bits(127, 8);
        bw.write_flag(false); // use_128x128_superblock
        bw.write_flag(false); // enable_filter_intra
        bw.write_flag(false); // enable_intra_edge_filter
        bw.write_flag(false); // enable_superres
        bw.write_flag(false); // enable_cdef
        bw.write_flag(false); // enable_restoration
        bw.write_flag(true); // high_bitdepth
        bw.write_flag(true); // color_description_present_flag
        bw.write_bits(u32::from(CP_BT_709), 8);
        bw.write_bits(u32::from(TC_SRGB), 8);
        bw.write_bits(u32::from(MC_IDENTITY), 8);
        bw.write_flag(true); // separate_uv_delta_q
        bw.write_flag(false); // film_grain_params_present
        let sh = SequenceHeader::parse(&bw.finish()).unwrap();

        assert!(sh.still_picture && sh.reduced_still_picture_header);
        assert_eq!(sh.operating_points[0].seq_level_idx, 5);
        assert_eq!((sh.max_frame_width(), sh.max_frame_height()), (256, 128));
        assert_eq!(sh.seq_force_integer_mv, SELECT);
        assert_eq!(sh.order_hint_bits, 0);
        assert_eq!(sh.color_config.bit_depth, 10);
        assert!(sh.color_config.color_range);
        assert!(!sh.color_config.subsampling_x && !sh.color_config.subsampling_y);
        assert!(sh.color_config.separate_uv_delta_q);
        assert_eq!(sh.syntax_element("transfer_characteristics").unwrap(), "13");
    }

    #[test]
    fn test_timing_and_decoder_model() {
        let mut bw = BitWriter::new();
        bw.write_bits(0, 3);
        bw.write_flag(false);
        bw.write_flag(false);
        bw.write_flag(true); // timing_info_present_flag
        bw.write_bits(1001, 32);
        bw.write_bits(60000, 32);
        bw.write_flag(true); // equal_picture_interval
        bw.write_uvlc(0);
        bw.write_flag(true); // decoder_model_info_present_flag
        bw.write_bits(9, 5); // buffer_delay_length_minus_1
        bw.write_bits(1001, 32);
        bw.write_bits(4, 5);
        bw.write_bits(4, 5);
        bw.write_flag(false); // initial_display_delay_present_flag
        bw.write_bits(0, 5);
        bw.write_bits(0, 12);
        bw.write_bits(9, 5);
        bw.write_bits(0, 1); // seq_tier
        bw.write_flag(true); // decoder_model_present_for_this_op
        bw.write_bits(500, 10);
        bw.write_bits(300, 10);
        bw.write_flag(false);
        // 其余字段全部为 0
        bw.write_bits(3, 4);
        bw.write_bits(3, 4);
        bw.write_bits(15, 4);
        bw.write_bits(15, 4);
        for _ in 0..10 {
            bw.write_flag(false);
        }
        bw.write_flag(false); // seq_force_screen_content_tools = 0
        for _ in 0..3 {
            bw.write_flag(false);
        }
        bw.write_flag(false); // high_bitdepth
        bw.write_flag(false); // mono_chrome
        bw.write_flag(false); // color_description_present_flag
        bw.write_flag(false); // color_range
        bw.write_bits(0, 2);
        bw.write_flag(false);
        bw.write_flag(true); // film_grain_params_present
        let sh = SequenceHeader::parse(&bw.finish()).unwrap();

        let timing = sh.timing_info.unwrap();
        assert_eq!(timing.time_scale, 60000);
        assert!(timing.equal_picture_interval);
        let op = sh.operating_points[0];
        assert!(op.decoder_model_present);
        assert_eq!((op.decoder_buffer_delay, op.encoder_buffer_delay), (500, 300));
        assert_eq!(sh.seq_force_screen_content_tools, 0);
        assert_eq!(sh.seq_force_integer_mv, SELECT);
        assert!(sh.film_grain_params_present);
        assert_eq!(sh.syntax_element("decoder_model_info_present_flag").unwrap(), "1");
    }

    #[test]
    fn test_truncated_header_is_eof() {
        let payload = write_main_profile_header(640, 480, 8);
        assert!(matches!(
            SequenceHeader::parse(&payload[..3]),
            Err(ConformError::Eof)
        ));
    }

    #[test]
    fn test_syntax_element_lookup() {
        let sh = SequenceHeader::parse(&write_main_profile_header(1280, 720, 9)).unwrap();
        assert_eq!(sh.syntax_element("seq_level_idx").unwrap(), "9");
        assert_eq!(sh.syntax_element("max_frame_width_minus_1").unwrap(), "1279");
        assert_eq!(sh.syntax_element("use_128x128_superblock").unwrap(), "1");
        assert_eq!(sh.syntax_element("seq_force_integer_mv").unwrap(), "2");
        assert_eq!(sh.syntax_element("operating_points_cnt_minus_1").unwrap(), "0");
        assert!(sh.syntax_element("qp").is_none());
        assert!(sh.syntax_element("intra_period_length").is_none());
    }
}
