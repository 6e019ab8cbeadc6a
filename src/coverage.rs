//! Statement accounting for a single function.

use crate::funcs::SourceFunction;
use crate::profile::CoverageBlock;

/// Count (covered, total) statements of the blocks attributed to `func`.
///
/// A block belongs to the function whose span contains the block's start
/// line. A block that straddles the end of a function stays whole with that
/// function; it is never split between two.
#[must_use]
pub fn function_coverage(func: &SourceFunction, blocks: &[CoverageBlock]) -> (u64, u64) {
    blocks
        .iter()
        .filter(|b| (func.start_line..=func.end_line).contains(&b.start.line))
        .fold((0, 0), |(covered, total), b| {
            let statements = u64::from(b.statements);
            let covered = if b.hits > 0 {
                covered + statements
            } else {
                covered
            };
            (covered, total + statements)
        })
}
