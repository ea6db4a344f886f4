// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::filter_config::FilterConfig;
use common::position::PositionFix;

/// Outcome of comparing a candidate fix with the current best fix.
///
/// Every variant names the rule that decided the comparison so callers can
/// report why a fix was taken or dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixDecision {
    /// No fix was retained yet.
    FirstFix,

    /// The candidate is newer than the retained fix by more than the threshold.
    SignificantlyNewer,

    /// The candidate is older than the retained fix by more than the threshold.
    SignificantlyOlder,

    /// The candidate has a strictly smaller error radius.
    MoreAccurate,

    /// The candidate is newer and not less accurate.
    NewerNotLessAccurate,

    /// The candidate is newer, from the same provider and only slightly less accurate.
    NewerSameProvider,

    /// None of the acceptance rules matched.
    NotBetter,
}

impl FixDecision {
    /// Returns `true` if the candidate supersedes the retained fix.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, FixDecision::SignificantlyOlder | FixDecision::NotBetter)
    }
}

/// Decides whether `candidate` should replace `current_best`.
///
/// The rules are evaluated in order and the first matching rule wins:
///
/// 1. Without a retained fix the candidate is always taken.
/// 2. A candidate newer by more than `config.significantly_newer` is taken,
///    regardless of accuracy, since the observer has likely moved.
/// 3. A candidate older by more than `config.significantly_newer` is dropped.
/// 4. Inside that window the candidate is taken if it is strictly more
///    accurate, or newer and not less accurate, or newer, from the same
///    provider and not more than `config.significantly_less_accurate`
///    meters worse.
///
/// A time difference exactly equal to the threshold falls into the window.
pub fn evaluate_fix(
    candidate: &PositionFix,
    current_best: Option<&PositionFix>,
    config: &FilterConfig,
) -> FixDecision {
    let Some(current_best) = current_best else {
        return FixDecision::FirstFix;
    };

    let time_delta = candidate.time_since(current_best);
    if time_delta > config.significantly_newer {
        return FixDecision::SignificantlyNewer;
    }
    if time_delta < -config.significantly_newer {
        return FixDecision::SignificantlyOlder;
    }

    let accuracy_delta = candidate.accuracy() - current_best.accuracy();
    let is_newer = time_delta > chrono::TimeDelta::zero();
    let is_less_accurate = accuracy_delta > 0.0;
    let is_significantly_less_accurate = accuracy_delta > config.significantly_less_accurate;
    let is_same_provider = candidate.provider() == current_best.provider();

    if accuracy_delta < 0.0 {
        FixDecision::MoreAccurate
    } else if is_newer && !is_less_accurate {
        FixDecision::NewerNotLessAccurate
    } else if is_newer && !is_significantly_less_accurate && is_same_provider {
        FixDecision::NewerSameProvider
    } else {
        FixDecision::NotBetter
    }
}

/// Returns `true` if `candidate` should replace `current_best`.
///
/// See [`evaluate_fix`] for the rules.
pub fn should_accept(
    candidate: &PositionFix,
    current_best: Option<&PositionFix>,
    config: &FilterConfig,
) -> bool {
    evaluate_fix(candidate, current_best, config).is_accepted()
}
