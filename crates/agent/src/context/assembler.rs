//! Builds the first transcript segment for a reasoning task.
//!
//! Assembly is deterministic: the same input always produces the same text.

/// Opening line of every agent prompt unless overridden.
pub const DEFAULT_PERSONA: &str =
    "You are Jarvis, an Advanced Autonomous AI Agent running LOCALLY on the user's computer.";

const RULES: &str = "IMPORTANT:
- File tools can only see the workspace directory. Use relative paths.
- Use 'remember' to keep facts the user asks you to remember.
- Tool output is the source of truth. Do not invent results.

INSTRUCTIONS:
1. Analyze the user's task carefully.
2. Think step-by-step about how to solve it.
3. Use tools when you need external information or to perform actions.
4. **VERIFY TOOL OUTPUT**: If a tool returns \"Error\", try again or use a different method. DO NOT claim success if the tool failed.
5. To use a tool, you MUST use this EXACT format:
   TOOL: tool_name
   INPUT: input_for_the_tool
6. If you have the final answer or don't need a tool, just write the answer normally.
";

/// Everything one task contributes to its prompt.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInput<'a> {
    pub task: &'a str,
    /// Free-form caller context, appended after the task.
    pub context: Option<&'a str>,
    /// Registry listing, one `- name: description` line per tool.
    pub tool_listing: &'a str,
    /// Recalled long-term memory snippets, most relevant first.
    pub memories: &'a [String],
}

#[derive(Debug, Clone)]
pub struct ContextAssembler {
    persona: String,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextAssembler {
    pub fn new() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
        }
    }

    /// Replace the opening persona line.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn assemble(&self, input: &AssemblyInput<'_>) -> String {
        let mut prompt = format!(
            "{}\n\nCAPABILITIES:\n{}\n\n{}{RULES}\nTASK: {}\n",
            self.persona,
            input.tool_listing,
            memory_block(input.memories),
            input.task
        );

        if let Some(context) = input.context
            && !context.trim().is_empty()
        {
            prompt.push_str("\nCONTEXT: ");
            prompt.push_str(context);
        }

        prompt.push_str("\n\nBegin reasoning:");
        prompt
    }
}

fn memory_block(memories: &[String]) -> String {
    if memories.is_empty() {
        return String::new();
    }
    let bullets: Vec<String> = memories.iter().map(|m| format!("- {m}")).collect();
    format!("\nRELEVANT MEMORIES:\n{}\n", bullets.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(memories: &'a [String], context: Option<&'a str>) -> AssemblyInput<'a> {
        AssemblyInput {
            task: "Calculate 25 * 4",
            context,
            tool_listing: "- calculator: Perform mathematical calculations.",
            memories,
        }
    }

    #[test]
    fn prompt_has_all_parts_in_order() {
        let memories = vec!["User likes metric units".to_string()];
        let prompt = ContextAssembler::new().assemble(&input(&memories, Some("be brief")));

        let order = [
            DEFAULT_PERSONA,
            "CAPABILITIES:\n- calculator: Perform mathematical calculations.",
            "RELEVANT MEMORIES:\n- User likes metric units\n",
            "TOOL: tool_name\n   INPUT: input_for_the_tool",
            "TASK: Calculate 25 * 4",
            "\nCONTEXT: be brief",
        ];
        let mut cursor = 0;
        for part in order {
            let found = prompt[cursor..]
                .find(part)
                .unwrap_or_else(|| panic!("missing or out of order: {part:?}"));
            cursor += found + part.len();
        }
        assert!(prompt.ends_with("\n\nBegin reasoning:"));
    }

    #[test]
    fn memory_block_omitted_when_empty() {
        let prompt = ContextAssembler::new().assemble(&input(&[], None));
        assert!(!prompt.contains("RELEVANT MEMORIES"));
        assert!(!prompt.contains("CONTEXT:"));
        assert!(prompt.ends_with("TASK: Calculate 25 * 4\n\n\nBegin reasoning:"));
    }

    #[test]
    fn memories_become_bullets() {
        let memories = vec!["a".to_string(), "b".to_string()];
        assert_eq!(memory_block(&memories), "\nRELEVANT MEMORIES:\n- a\n- b\n");
    }

    #[test]
    fn blank_context_is_ignored() {
        let prompt = ContextAssembler::new().assemble(&input(&[], Some("   ")));
        assert!(!prompt.contains("CONTEXT:"));
    }

    #[test]
    fn custom_persona() {
        let prompt = ContextAssembler::new()
            .with_persona("You are a test agent.")
            .assemble(&input(&[], None));
        assert!(prompt.starts_with("You are a test agent.\n\nCAPABILITIES:\n"));
    }

    #[test]
    fn assembly_is_deterministic() {
        let memories = vec!["x".to_string()];
        let a = ContextAssembler::new().assemble(&input(&memories, Some("c")));
        let b = ContextAssembler::new().assemble(&input(&memories, Some("c")));
        assert_eq!(a, b);
    }
}
