// src/engine/normal.rs

//! Standard normal quantile function.

// Coefficients of Acklam's rational approximation.
const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

const P_LOW: f64 = 0.02425;
const P_HIGH: f64 = 1.0 - P_LOW;

/// Inverse cumulative distribution function of the standard normal.
///
/// Relative error below 1.2e-9 over the open interval. Returns `None` when
/// `p` is not strictly between 0 and 1, where the quantile is infinite or
/// undefined.
pub fn inverse_normal_cdf(p: f64) -> Option<f64> {
    if !(p > 0.0 && p < 1.0) {
        return None;
    }

    let z = if p < P_LOW {
        // Lower tail
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        // Upper tail, by symmetry
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    Some(z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn median_is_zero() {
        assert!(close(inverse_normal_cdf(0.5).unwrap(), 0.0));
    }

    #[test]
    fn known_quantiles() {
        assert!(close(inverse_normal_cdf(0.9).unwrap(), 1.281_551_565_5));
        assert!(close(inverse_normal_cdf(0.95).unwrap(), 1.644_853_626_9));
        assert!(close(inverse_normal_cdf(0.99).unwrap(), 2.326_347_874_0));
        assert!(close(inverse_normal_cdf(0.01).unwrap(), -2.326_347_874_0));
    }

    #[test]
    fn symmetric_around_median() {
        for p in [0.001, 0.02, 0.1, 0.3] {
            let lo = inverse_normal_cdf(p).unwrap();
            let hi = inverse_normal_cdf(1.0 - p).unwrap();
            assert!(close(lo, -hi), "p = {p}");
        }
    }

    #[test]
    fn bounds_are_rejected() {
        assert_eq!(inverse_normal_cdf(0.0), None);
        assert_eq!(inverse_normal_cdf(1.0), None);
        assert_eq!(inverse_normal_cdf(-0.2), None);
        assert_eq!(inverse_normal_cdf(f64::NAN), None);
    }
}
