//! System prompt templates for the agent.

use crate::tools::ToolRegistry;

/// Build the system prompt with tool definitions.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a helpful assistant that answers user questions.

## Your Capabilities

You have access to the following tools:
{tool_descriptions}

## Rules and Guidelines

1. **Use tools when they help** - Call a tool when the question needs it (reversing text, the current time, the reputation of an IP address). Answer directly otherwise.

2. **Relay tool errors** - If a tool returns an error message, report the relevant information to the user instead of retrying indefinitely.

3. **Be concise** - Answer the question and stop. Don't pad the response with unrequested detail.

If you need to use a tool, respond with a tool call. The system will execute it and return the result."#,
        tool_descriptions = tool_descriptions
    )
}
