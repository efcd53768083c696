//! Property-based tests for the notes client
//!
//! Property tests verify invariants that hold for all inputs, rather than
//! specific cases.
//!
//! ## Test Modules
//!
//! - `search_props`: client-side search
//!   - Every result matches the term, every dropped record does not
//!   - Results keep input order
//!   - Matching ignores case and surrounding whitespace
//!   - Blank terms are rejected
//!
//! - `format_props`: display helpers
//!   - Relative dates land in the right bucket
//!   - Previews respect their budget and always end in `...`
//!   - Escaped text survives a trip through paragraph markup
//!   - Editor output is blank exactly when the typed text is
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod format_props;
mod search_props;
