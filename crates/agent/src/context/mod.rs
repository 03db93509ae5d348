//! Initial prompt assembly for reasoning tasks.
//!
//! The prompt is built once per task from these parts, in order:
//!
//! | Part | Source | When absent |
//! |------|--------|-------------|
//! | Persona | [`ContextAssembler`] | never absent |
//! | Capabilities | tool registry listing | empty listing |
//! | Relevant memories | long-term memory recall | block omitted |
//! | Rules and directive format | fixed | never absent |
//! | Task | caller | never absent |
//! | Context | caller | line omitted |
//! | Reasoning cue | fixed | never absent |

pub mod assembler;

pub use assembler::{AssemblyInput, ContextAssembler, DEFAULT_PERSONA};
