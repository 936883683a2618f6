//! qindex 与 qp 之间的映射.
//!
//! qindex 为解码器内部 0-255 的量化索引, qp 为一致性报告使用的 0-63 量化步长.

use log::warn;

/// qindex 最大合法值
pub const MAX_QINDEX: u32 = 255;

/// qp 最大值
pub const MAX_QP: u8 = 63;

/// qp → qindex 边界表 (严格递增)
pub const QUANTIZER_TO_QINDEX: [u8; 64] = [
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56, 60, 64, 68, 72, 76, 80, 84, 88, 92,
    96, 100, 104, 108, 112, 116, 120, 124, 128, 132, 136, 140, 144, 148, 152, 156, 160, 164, 168,
    172, 176, 180, 184, 188, 192, 196, 200, 204, 208, 212, 216, 220, 224, 228, 232, 236, 240, 244,
    249, 255,
];

/// 将 qindex 映射为 qp
///
/// - 恰好落在边界上: 返回该边界的位置
/// - 落在两个边界之间: 返回距离更近的一侧, 距离相等时取较小的 qp
/// - 超过 255: 输出诊断并返回 63
pub fn qindex_to_qp(qindex: u32) -> u8 {
    if qindex > MAX_QINDEX {
        warn!("qindex {} 超过 {}, 按 qp={} 处理", qindex, MAX_QINDEX, MAX_QP);
        return MAX_QP;
    }

    // 首个 >= qindex 的边界位置; 表首为 0, 因此 upper 存在且 upper 为 0 时必然精确命中
    let upper = QUANTIZER_TO_QINDEX.partition_point(|&b| u32::from(b) < qindex);
    let upper_bound = u32::from(QUANTIZER_TO_QINDEX[upper]);
    if upper_bound == qindex {
        return upper as u8;
    }

    let lower = upper - 1;
    let lower_bound = u32::from(QUANTIZER_TO_QINDEX[lower]);
    if upper_bound - qindex < qindex - lower_bound {
        upper as u8
    } else {
        lower as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_boundaries() {
        for (i, &b) in QUANTIZER_TO_QINDEX.iter().enumerate() {
            assert_eq!(qindex_to_qp(u32::from(b)), i as u8, "边界 {b} 应映射到 {i}");
        }
    }

    #[test]
    fn test_monotone() {
        let mut prev = 0u8;
        for q in 0..=MAX_QINDEX {
            let qp = qindex_to_qp(q);
            assert!(qp >= prev, "qindex {q} 的 qp 出现回退");
            prev = qp;
        }
        assert_eq!(prev, MAX_QP);
    }

    #[test]
    fn test_nearest_with_lower_tie() {
        // 0 与 4 之间
        assert_eq!(qindex_to_qp(1), 0);
        assert_eq!(qindex_to_qp(2), 0);
        assert_eq!(qindex_to_qp(3), 1);
        // 244 与 249 之间
        assert_eq!(qindex_to_qp(246), 61);
        assert_eq!(qindex_to_qp(247), 62);
        // 249 与 255 之间, 252 距离相等
        assert_eq!(qindex_to_qp(251), 62);
        assert_eq!(qindex_to_qp(252), 62);
        assert_eq!(qindex_to_qp(253), 63);
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(qindex_to_qp(256), MAX_QP);
        assert_eq!(qindex_to_qp(u32::MAX), MAX_QP);
    }
}
