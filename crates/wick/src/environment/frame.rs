//! Block-result frames and the RAII guard that pops them

use tracing::trace;

use super::{BindingKey, Environment};
use crate::value::Value;

/// How a block combines its statement values into its own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultStrategy {
    /// Each statement overwrites the accumulator; the last one wins
    #[default]
    Last,
}

/// Per-block evaluation state.
#[derive(Debug, Clone)]
pub struct BlockFrame {
    /// The block's running value
    pub result: Value,

    /// How statement values are folded into `result`
    pub strategy: ResultStrategy,

    /// Macros pushed while this block was innermost
    pub macros: Vec<BindingKey>,
}

impl BlockFrame {
    fn new() -> Self {
        Self {
            result: Value::Undefined,
            strategy: ResultStrategy::default(),
            macros: Vec::new(),
        }
    }

    fn record(&mut self, value: Value) {
        match self.strategy {
            ResultStrategy::Last => self.result = value,
        }
    }
}

impl Environment {
    /// Enter a block: push a fresh accumulator frame.
    pub fn push_block(&mut self) {
        self.blocks.push(BlockFrame::new());
    }

    /// Exit a block: pop its frame, undo its macro pushes, return its value.
    ///
    /// Returns `None` if no block is active.
    pub fn pop_block(&mut self) -> Option<Value> {
        let frame = self.blocks.pop()?;
        for key in frame.macros.iter().rev() {
            self.macros.pop_macro(key);
        }
        trace!(
            depth = self.blocks.len(),
            macros = frame.macros.len(),
            "block exit"
        );
        Some(frame.result)
    }

    /// Fold a statement value into the innermost block's accumulator.
    pub fn record_result(&mut self, value: Value) {
        if let Some(frame) = self.blocks.last_mut() {
            frame.record(value);
        }
    }

    /// Number of active blocks.
    pub fn block_depth(&self) -> usize {
        self.blocks.len()
    }

    /// Push a block frame now and pop it when the guard is dropped.
    pub fn block_guard(&mut self) -> BlockGuard<'_> {
        self.push_block();
        BlockGuard {
            env: self,
            finished: false,
        }
    }
}

/// RAII guard that pops a block frame when dropped.
///
/// Dropping without [`BlockGuard::finish`] (an error exit) still pops the
/// frame and every macro the block pushed.
///
/// # Example
///
/// ```
/// use wick::{Environment, Value};
///
/// let mut env = Environment::new();
/// {
///     let mut guard = env.block_guard();
///     guard.record_result(Value::Number(1.0));
///     guard.record_result(Value::Number(2.0));
///     assert_eq!(guard.finish(), Value::Number(2.0));
/// }
/// assert_eq!(env.block_depth(), 0);
/// ```
pub struct BlockGuard<'a> {
    env: &'a mut Environment,
    finished: bool,
}

impl<'a> BlockGuard<'a> {
    /// Pop the frame and return the block's value.
    pub fn finish(mut self) -> Value {
        self.finished = true;
        self.env.pop_block().unwrap_or(Value::Undefined)
    }
}

impl<'a> Drop for BlockGuard<'a> {
    fn drop(&mut self) {
        if !self.finished {
            self.env.pop_block();
        }
    }
}

impl<'a> std::ops::Deref for BlockGuard<'a> {
    type Target = Environment;

    fn deref(&self) -> &Self::Target {
        self.env
    }
}

impl<'a> std::ops::DerefMut for BlockGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.env
    }
}
