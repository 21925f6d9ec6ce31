//! Human-readable terminal reports with colors.
//!
//! The engines only return structured numbers; every rounding decision
//! lives here.

use std::time::Duration;

use colored::Colorize;

use crate::preflight::{exhaustive_count, exhaustive_is_practical};
use crate::result::{BootstrapResult, Interval, PermutationResult};

fn format_interval(iv: &Interval, prec: usize) -> String {
    format!("[{:.prec$}, {:.prec$}]", iv.lower, iv.upper, prec = prec)
}

/// Format a bootstrap result for terminal display with `prec` decimal
/// places.
pub fn format_bootstrap(result: &BootstrapResult, prec: usize) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("bootstrap confidence intervals\n");
    output.push_str(&sep);
    output.push('\n');

    output.push_str(&format!(
        "  Point estimate:    {:.prec$}\n",
        result.theta_hat,
        prec = prec
    ));
    output.push_str(&format!("  Sample size:       {}\n", result.n));
    output.push_str(&format!(
        "  Replicates:        {} used of {} drawn",
        result.replicates_used, result.reps1
    ));
    if result.reps2 > 0 {
        output.push_str(&format!(" ({} inner each)", result.reps2));
    }
    output.push('\n');
    if result.failed > 0 || result.failed_inner > 0 {
        output.push_str(&format!(
            "  {}\n",
            format!(
                "\u{26A0} {} failed evaluations ({} inner)",
                result.failed, result.failed_inner
            )
            .yellow()
        ));
    }
    output.push_str(&format!(
        "  Bootstrap SE:      {:.prec$}\n",
        result.se_boot,
        prec = prec
    ));
    output.push_str(&format!(
        "  Bias:              {:.prec$}\n",
        result.bias,
        prec = prec
    ));
    output.push('\n');

    let coverage = (1.0 - result.alpha) * 100.0;
    output.push_str(&format!("  {:.1}% intervals\n", coverage));
    output.push_str(&format!(
        "    Normal:          {}\n",
        format_interval(&result.normal, prec)
    ));
    output.push_str(&format!(
        "    Percentile:      {}\n",
        format_interval(&result.percentile, prec)
    ));
    output.push_str(&format!(
        "    BC:              {}\n",
        format_interval(&result.bc, prec)
    ));
    match &result.bca {
        Some(bca) => output.push_str(&format!(
            "    BCa:             {}\n",
            format_interval(bca, prec)
        )),
        None => output.push_str(&format!(
            "    BCa:             {}\n",
            "unavailable (acceleration coefficient failed)".yellow()
        )),
    }
    if let Some(double) = &result.double {
        output.push_str(&format!(
            "    Double:          {}\n",
            format_interval(double, prec)
        ));
    }

    output.push('\n');
    output.push_str(&format!("  Runtime: {:.2?}\n", result.runtime));
    output.push_str(&sep);
    output.push('\n');
    output
}

/// Format a permutation-test result for terminal display with `prec`
/// decimal places.
pub fn format_permutation(result: &PermutationResult, prec: usize) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("permutation test\n");
    output.push_str(&sep);
    output.push('\n');

    let mode = match (result.exhaustive, result.paired) {
        (true, true) => "exhaustive, paired",
        (true, false) => "exhaustive, unpaired",
        (false, true) => "random sampling, paired",
        (false, false) => "random sampling, unpaired",
    };
    let sides = if result.onesided {
        "one-sided"
    } else {
        "two-sided"
    };
    output.push_str(&format!("  Mode:              {} ({})\n", mode, sides));
    output.push_str(&format!(
        "  Theta group 1:     {:.prec$}\n",
        result.theta1,
        prec = prec
    ));
    output.push_str(&format!(
        "  Theta group 2:     {:.prec$}\n",
        result.theta2,
        prec = prec
    ));
    output.push_str(&format!(
        "  Observed statistic:{:.prec$}\n",
        result.empdiff,
        prec = prec
    ));
    output.push_str(&format!(
        "  Relabelings:       {} ({} extreme)\n",
        result.total_count, result.extreme_count
    ));
    output.push('\n');

    let p_line = format!("  P-value: {:.prec$}", result.p_value, prec = prec);
    if result.p_value < 0.05 {
        output.push_str(&format!("{}\n", p_line.green().bold()));
    } else {
        output.push_str(&format!("{}\n", p_line.bold()));
    }

    output.push('\n');
    output.push_str(&format!("  Runtime: {:.2?}\n", result.runtime));
    output.push_str(&sep);
    output.push('\n');
    output
}

/// Format a preflight runtime estimate in the coarse buckets a human
/// actually wants: below 5 seconds, seconds, minutes, or hours.
pub fn format_runtime_estimate(estimate: Duration) -> String {
    if estimate == Duration::MAX {
        return "Estimated runtime exceeds any practical bound".to_string();
    }
    let secs = estimate.as_secs_f64();
    if secs < 5.0 {
        "Estimated runtime below 5 seconds".to_string()
    } else if secs < 60.0 {
        format!("Estimated runtime about {:.0} seconds", secs)
    } else if secs < 3600.0 {
        format!("Estimated runtime about {:.1} minutes", secs / 60.0)
    } else {
        format!("Estimated runtime about {:.1} hours", secs / 3600.0)
    }
}

/// Warning line for exhaustive requests over the practical-size
/// thresholds; `None` when the request is fine.
pub fn format_exhaustive_warning(len_a: usize, len_b: usize, paired: bool) -> Option<String> {
    if exhaustive_is_practical(len_a, len_b, paired) {
        return None;
    }
    let count = exhaustive_count(len_a, len_b, paired)
        .map(|c| c.to_string())
        .unwrap_or_else(|| "more than u128 can hold".to_string());
    Some(format!(
        "{} exhaustive enumeration would evaluate {} relabelings; consider random sampling",
        "\u{26A0}".yellow(),
        count
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_buckets() {
        assert_eq!(
            format_runtime_estimate(Duration::from_secs(2)),
            "Estimated runtime below 5 seconds"
        );
        assert!(format_runtime_estimate(Duration::from_secs(30)).contains("seconds"));
        assert!(format_runtime_estimate(Duration::from_secs(600)).contains("minutes"));
        assert!(format_runtime_estimate(Duration::from_secs(7200)).contains("hours"));
        assert!(format_runtime_estimate(Duration::MAX).contains("practical bound"));
    }

    #[test]
    fn exhaustive_warning_only_over_threshold() {
        assert!(format_exhaustive_warning(3, 3, false).is_none());
        let warning = format_exhaustive_warning(12, 12, false).unwrap();
        assert!(warning.contains("2704156")); // C(24, 12)
        assert!(format_exhaustive_warning(30, 30, true)
            .unwrap()
            .contains(&(1u128 << 30).to_string()));
    }
}
