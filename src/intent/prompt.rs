//! Instruction prompt sent to the oracle.
//!
//! The prompt pins the oracle to the structured response grammar; the
//! parser on the other side still treats compliance as best-effort.

use chrono::Utc;

const SYSTEM_PROMPT: &str = r#"You are an AI-powered task management assistant. Respond to every request in the structured format below and nothing else.

For creating tasks:
**Task Name:** [task name]
**Priority:** [low/medium/high]
**Action:** Create

For updating tasks:
**Old Task Name:** [existing task name]
**New Task Name:** [updated task name] (only if renaming)
**Priority:** [updated priority] (only if changing)
**Action:** Update

For marking completion:
**Task Name:** [task name]
**Completion Status:** [completed/pending]
**Action:** Mark Completion

For deleting tasks:
**Task Name:** [task name]
**Action:** Delete

For listing tasks:
**Filter:** [all/completed/pending/high priority/medium priority/low priority]
**Action:** List

Guidelines:
- Extract clear task details from the natural-language request.
- Identify exactly one operation per request; never describe several.
- Default priority is medium when not specified.
- Be concise but precise in task descriptions.
- If the request is unclear or ambiguous, respond with:
**Action:** unclear
**Notes:** [what is missing or ambiguous]"#;

/// Build the full prompt for one user request.
pub fn build_prompt(user_prompt: &str, owner: &str) -> String {
    format!(
        "{SYSTEM_PROMPT}\n\nCurrent timestamp: {}\nUser Email: {owner}\nUser Request: \"{}\"",
        Utc::now().to_rfc3339(),
        user_prompt.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_request_and_owner() {
        let prompt = build_prompt("  add a task  ", "user@example.com");
        assert!(prompt.contains("User Request: \"add a task\""));
        assert!(prompt.contains("User Email: user@example.com"));
        assert!(prompt.contains("**Action:** Create"));
    }
}
