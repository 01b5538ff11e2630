//! Value representation for runtime values

mod callable;
mod compound;
mod display;
mod impls;

pub use callable::{BoundMethod, BuiltinFn, BuiltinFnPtr, MethodFn, MethodFnPtr};
pub use compound::RecordValue;

use std::sync::Arc;

/// Type tag of text values; also the name of their method table.
pub const TEXT_TYPE: &str = "text";

/// Type tag of sequence values; also the name of their method table.
pub const SEQ_TYPE: &str = "seq";

/// Type tag of numbers.
pub const NUMBER_TYPE: &str = "number";

/// Runtime value representation for the wick evaluator.
///
/// Values are organized into three tiers:
/// - Tier 1: Inline primitives (no allocation)
/// - Tier 2: Heap-allocated compound types (Arc-wrapped, cheap to clone)
/// - Tier 3: Invocable types (builtins and bound methods)
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Inline Primitives
    // ═══════════════════════════════════════════════════════════════════
    /// Result of an empty block or a side-effect-only builtin
    Undefined,

    /// Every number is a double
    Number(f64),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Heap-Allocated Compound Types
    // ═══════════════════════════════════════════════════════════════════
    /// Text with escapes already resolved
    Text(Arc<String>),

    /// Ordered sequence
    Seq(Arc<Vec<Value>>),

    /// Record with a type name and named fields
    Record(Arc<RecordValue>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 3: Invocable Types
    // ═══════════════════════════════════════════════════════════════════
    /// Built-in native function
    Builtin(BuiltinFn),

    /// Method bound to the receiver it was looked up on
    Method(Arc<BoundMethod>),
}
