//! The Jarvis agent: a ReAct reasoning loop over the inference router.
//!
//! 1. **Assemble** the initial prompt (persona, tools, recalled memories, task)
//! 2. **Ask** the router for the next step, sending the whole transcript
//! 3. **Act** on a `TOOL:`/`INPUT:` directive, append the observation, repeat
//! 4. **Answer** when the model replies without a directive
//!
//! The loop stops at the configured step limit.

pub mod context;
pub mod directive;
pub mod patterns;
pub mod prompts;
pub mod transcript;

pub use context::{AssemblyInput, ContextAssembler};
pub use directive::{ToolDirective, parse_directive};
pub use patterns::react::STEP_LIMIT_MESSAGE;
pub use patterns::{ReactAgent, StepRecord, TaskResult, Termination};
pub use prompts::{ChatMode, UnknownMode};
pub use transcript::Transcript;
