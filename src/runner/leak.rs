//! Leak detector - repeated passes with live-object sampling.
//!
//! A single before/after sample around one pass cannot tell a steady-state leak from first-call caches, so
//! the whole battery runs `policy.runs` times and only the drift after the first `policy.warmup` passes is
//! checked. Any non-zero drift there is a leak.

use std::io::Write;

use super::interfaces::LiveObjectCounter;
use crate::config::LeakPolicy;
use crate::error::{HarnessError, HarnessResult};

/// Run `pass` repeatedly, sampling `counter` around each repetition.
///
/// Stops at the first error from `pass`, or with [`HarnessError::RefLeak`] at the first post-warm-up
/// repetition whose drift is non-zero.
#[tracing::instrument(skip_all, fields(runs = policy.runs, warmup = policy.warmup))]
pub fn check_refleak<F>(
    counter: &dyn LiveObjectCounter,
    policy: &LeakPolicy,
    verbose: bool,
    out: &mut dyn Write,
    mut pass: F,
) -> HarnessResult<()>
where
    F: FnMut(&mut dyn Write) -> HarnessResult<()>,
{
    let nrun = policy.runs;
    for run in 1..=nrun {
        if verbose {
            if run > 1 {
                writeln!(out)?;
            }
            writeln!(out, "Run {run}/{nrun}:")?;
            out.flush()?;
        }

        let before = counter.count_live_objects();
        pass(out)?;
        let diff = counter.count_live_objects() - before;

        tracing::debug!(run, diff, "leak check sample");

        if run > policy.warmup && diff != 0 {
            return Err(HarnessError::RefLeak { run, diff });
        }
    }
    Ok(())
}
