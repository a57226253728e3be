//! Media query assembly

use crate::dictionary::Breakpoints;
use crate::resolver::ResolvedGroups;

/// Wraps resolved viewport rules in `@media` blocks, in breakpoint order
#[derive(Debug, Clone, Copy)]
pub struct MediaQueryAssembler<'t> {
    breakpoints: &'t Breakpoints,
}

impl<'t> MediaQueryAssembler<'t> {
    pub fn new(breakpoints: &'t Breakpoints) -> Self {
        Self { breakpoints }
    }

    /// Emit one block per breakpoint that has rules. Resolved viewports that
    /// are not breakpoints are dropped.
    pub fn assemble(&self, resolved: &ResolvedGroups<'_>) -> String {
        for viewport in resolved.keys() {
            if !self.breakpoints.contains(viewport) {
                log::debug!("Dropping rules for unknown viewport '{}'", viewport);
            }
        }

        let mut output = String::new();
        for (name, breakpoint) in self.breakpoints.iter() {
            let Some(rules) = resolved.get(name).filter(|rules| !rules.is_empty()) else {
                continue;
            };
            output.push_str(&breakpoint.media_query());
            output.push('{');
            output.push_str(rules);
            output.push('}');
        }
        output
    }
}
