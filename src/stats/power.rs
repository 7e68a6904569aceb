//! Power Analysis Module
//! Sample-size estimation for the regression F-test (all predictors jointly zero).
//!
//! Model, for `k` predictors and total sample size `N`:
//! - numerator df `u = k`, denominator df `v = N - k - 1`
//! - noncentrality `lambda = f2 * N`, with `f2` Cohen's effect size
//! - power = P(F'(u, v, lambda) > F_crit), F_crit the upper-alpha point of F(u, v)

use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use statrs::function::beta::beta_reg;
use statrs::function::gamma::ln_gamma;
use thiserror::Error;

/// Sample sizes above this are reported as unreachable.
const MAX_SAMPLE_SIZE: f64 = 1e9;
const BISECTION_TOLERANCE: f64 = 1e-8;
const MAX_BISECTION_STEPS: usize = 300;

#[derive(Error, Debug, PartialEq)]
pub enum PowerError {
    #[error("effect_size must be a positive finite number, got {0}")]
    InvalidEffectSize(f64),
    #[error("alpha must be in (0, 1), got {0}")]
    InvalidAlpha(f64),
    #[error("power must be in (0, 1), got {0}")]
    InvalidPower(f64),
    #[error("num_predictors must be at least 1")]
    NoPredictors,
    #[error("sample size must exceed num_predictors + 1, got {0}")]
    InvalidSampleSize(f64),
    #[error("Distribution error: {0}")]
    Distribution(String),
    #[error("No sample size below {0} reaches the requested power")]
    NoSolution(f64),
}

/// Minimum total sample size for an F-test with `num_predictors` predictors
/// to reach `power` at significance `alpha`, for Cohen's f2 `effect_size`.
pub fn power_analysis(
    effect_size: f64,
    alpha: f64,
    power: f64,
    num_predictors: usize,
) -> Result<f64, PowerError> {
    FTestPower::new(num_predictors, alpha)?.solve_sample_size(effect_size, power)
}

/// Convert a coefficient of determination to Cohen's f2.
pub fn cohens_f2_from_r2(r2: f64) -> Result<f64, PowerError> {
    if !(0.0..1.0).contains(&r2) {
        return Err(PowerError::InvalidEffectSize(r2));
    }
    Ok(r2 / (1.0 - r2))
}

/// F-test power model for a fixed predictor count and significance level.
#[derive(Debug, Clone, Copy)]
pub struct FTestPower {
    num_predictors: usize,
    alpha: f64,
}

impl FTestPower {
    pub fn new(num_predictors: usize, alpha: f64) -> Result<Self, PowerError> {
        if num_predictors == 0 {
            return Err(PowerError::NoPredictors);
        }
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(PowerError::InvalidAlpha(alpha));
        }
        Ok(Self {
            num_predictors,
            alpha,
        })
    }

    pub fn num_predictors(&self) -> usize {
        self.num_predictors
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Achieved power for a total sample size `n` (may be fractional).
    pub fn power(&self, effect_size: f64, n: f64) -> Result<f64, PowerError> {
        check_effect_size(effect_size)?;
        let df_num = self.num_predictors as f64;
        let df_denom = n - df_num - 1.0;
        if !(df_denom > 0.0) || !n.is_finite() {
            return Err(PowerError::InvalidSampleSize(n));
        }

        let crit = critical_value(df_num, df_denom, self.alpha)?;
        let nc = effect_size * n;
        Ok(noncentral_f_sf(crit, df_num, df_denom, nc))
    }

    /// Smallest total sample size whose achieved power reaches `power`.
    pub fn solve_sample_size(&self, effect_size: f64, power: f64) -> Result<f64, PowerError> {
        check_effect_size(effect_size)?;
        if !(power > 0.0 && power < 1.0) {
            return Err(PowerError::InvalidPower(power));
        }

        // Smallest N with one denominator degree of freedom
        let mut lo = self.num_predictors as f64 + 2.0;
        if self.power(effect_size, lo)? >= power {
            return Ok(lo);
        }

        let mut hi = lo * 2.0;
        while self.power(effect_size, hi)? < power {
            lo = hi;
            hi *= 2.0;
            if hi > MAX_SAMPLE_SIZE {
                return Err(PowerError::NoSolution(MAX_SAMPLE_SIZE));
            }
        }
        log::debug!("Sample size bracketed in [{}, {}]", lo, hi);

        for _ in 0..MAX_BISECTION_STEPS {
            if hi - lo <= BISECTION_TOLERANCE {
                break;
            }
            let mid = 0.5 * (lo + hi);
            if self.power(effect_size, mid)? >= power {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        log::info!(
            "Required sample size {:.2} (f2={}, alpha={}, power={}, predictors={})",
            hi,
            effect_size,
            self.alpha,
            power,
            self.num_predictors
        );
        Ok(hi)
    }
}

fn check_effect_size(effect_size: f64) -> Result<(), PowerError> {
    if effect_size.is_finite() && effect_size > 0.0 {
        Ok(())
    } else {
        Err(PowerError::InvalidEffectSize(effect_size))
    }
}

/// Upper-`alpha` point of the central F distribution.
fn critical_value(df_num: f64, df_denom: f64, alpha: f64) -> Result<f64, PowerError> {
    let dist = FisherSnedecor::new(df_num, df_denom)
        .map_err(|e| PowerError::Distribution(e.to_string()))?;
    let crit = dist.inverse_cdf(1.0 - alpha);
    if !crit.is_finite() {
        return Err(PowerError::Distribution(format!(
            "no critical value for F({}, {}) at alpha {}",
            df_num, df_denom, alpha
        )));
    }
    Ok(crit)
}

/// Survival function of the noncentral F distribution, as a Poisson(nc/2)
/// mixture of regularized incomplete beta functions.
fn noncentral_f_sf(x: f64, df_num: f64, df_denom: f64, nc: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    // P(F' > x) = sum_j w_j * I_{1-y}(v/2, u/2 + j), y = u x / (u x + v)
    let one_minus_y = df_denom / (df_num * x + df_denom);
    let half_nc = nc / 2.0;

    if half_nc == 0.0 {
        return beta_reg(df_denom / 2.0, df_num / 2.0, one_minus_y);
    }

    // Poisson weights outside mean +/- (12 sd + 30) are below f64 resolution
    let spread = 12.0 * half_nc.sqrt() + 30.0;
    let j_min = (half_nc - spread).floor().max(0.0) as u64;
    let j_max = (half_nc + spread).ceil() as u64;
    let mut sf = 0.0;
    for j in j_min..=j_max {
        let jf = j as f64;
        let log_weight = -half_nc + jf * half_nc.ln() - ln_gamma(jf + 1.0);
        let weight = log_weight.exp();
        if weight == 0.0 {
            continue;
        }
        sf += weight * beta_reg(df_denom / 2.0, df_num / 2.0 + jf, one_minus_y);
    }

    sf.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medium_effect_seven_predictors() {
        // Standard tables: f2 = 0.15, alpha = 0.05, power = 0.8, 7 predictors -> N = 103
        let n = power_analysis(0.15, 0.05, 0.8, 7).unwrap();
        assert!(n.is_finite());
        assert!(n > 100.0 && n <= 103.5, "got {}", n);
    }

    #[test]
    fn test_solution_reaches_requested_power() {
        let model = FTestPower::new(7, 0.05).unwrap();
        let n = model.solve_sample_size(0.15, 0.8).unwrap();

        assert!(model.power(0.15, n).unwrap() >= 0.8);
        assert!(model.power(0.15, n - 1.0).unwrap() < 0.8);
    }

    #[test]
    fn test_more_power_needs_more_samples() {
        let mut previous = 0.0;
        for power in [0.5, 0.7, 0.8, 0.9, 0.95] {
            let n = power_analysis(0.15, 0.05, power, 5).unwrap();
            assert!(n > previous, "power {} gave {} <= {}", power, n, previous);
            previous = n;
        }
    }

    #[test]
    fn test_larger_effect_or_alpha_needs_fewer_samples() {
        let small = power_analysis(0.02, 0.05, 0.8, 3).unwrap();
        let medium = power_analysis(0.15, 0.05, 0.8, 3).unwrap();
        let large = power_analysis(0.35, 0.05, 0.8, 3).unwrap();
        assert!(small > medium && medium > large);

        let strict = power_analysis(0.15, 0.01, 0.8, 3).unwrap();
        assert!(strict > medium);
    }

    #[test]
    fn test_critical_value_matches_tables() {
        // F(7, 95) upper 5% point
        let crit = critical_value(7.0, 95.0, 0.05).unwrap();
        assert!((crit - 2.1075065).abs() < 1e-6, "got {}", crit);
        // F(1, 10) upper 5% point
        let crit = critical_value(1.0, 10.0, 0.05).unwrap();
        assert!((crit - 4.9646).abs() < 1e-3, "got {}", crit);
    }

    #[test]
    fn test_huge_effect_needs_minimum_sample() {
        let n = power_analysis(1e6, 0.05, 0.8, 3).unwrap();
        assert_eq!(n, 5.0);

        let model = FTestPower::new(3, 0.05).unwrap();
        let p = model.power(100.0, 50.0).unwrap();
        assert!(p > 0.999, "got {}", p);
    }

    #[test]
    fn test_power_is_at_least_alpha() {
        let model = FTestPower::new(2, 0.05).unwrap();
        let p = model.power(0.01, 10.0).unwrap();
        assert!(p >= 0.05 && p < 1.0);
    }

    #[test]
    fn test_out_of_domain_inputs_fail() {
        assert_eq!(
            power_analysis(0.0, 0.05, 0.8, 7),
            Err(PowerError::InvalidEffectSize(0.0))
        );
        assert_eq!(
            power_analysis(-0.1, 0.05, 0.8, 7),
            Err(PowerError::InvalidEffectSize(-0.1))
        );
        assert!(matches!(
            power_analysis(0.15, 0.0, 0.8, 7),
            Err(PowerError::InvalidAlpha(_))
        ));
        assert!(matches!(
            power_analysis(0.15, 1.0, 0.8, 7),
            Err(PowerError::InvalidAlpha(_))
        ));
        assert!(matches!(
            power_analysis(0.15, 0.05, 0.0, 7),
            Err(PowerError::InvalidPower(_))
        ));
        assert!(matches!(
            power_analysis(0.15, 0.05, 1.0, 7),
            Err(PowerError::InvalidPower(_))
        ));
        assert_eq!(power_analysis(0.15, 0.05, 0.8, 0), Err(PowerError::NoPredictors));
        assert!(matches!(
            power_analysis(f64::NAN, 0.05, 0.8, 7),
            Err(PowerError::InvalidEffectSize(_))
        ));
    }

    #[test]
    fn test_power_rejects_too_few_samples() {
        let model = FTestPower::new(7, 0.05).unwrap();
        assert!(matches!(
            model.power(0.15, 8.0),
            Err(PowerError::InvalidSampleSize(_))
        ));
    }

    #[test]
    fn test_f2_from_r2() {
        let f2 = cohens_f2_from_r2(0.13).unwrap();
        assert!((f2 - 0.13 / 0.87).abs() < 1e-12);
        assert!(cohens_f2_from_r2(1.0).is_err());
    }
}
