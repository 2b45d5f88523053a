//! Persona prompt construction.
//!
//! Builds the exact message sequence sent upstream: persona system prompt,
//! a bounded window of prior turns, and the new user message. A reset
//! request drops the history entirely so no prior context can leak into the
//! fresh greeting.

use islet_common::{Role, Turn, RESET_MARKER};
use islet_config::Persona;

/// Number of trailing history turns forwarded upstream per request.
/// Bounds context size independent of how long the conversation has run;
/// older turns stay in the client's persisted history but are not sent.
pub const HISTORY_WINDOW: usize = 10;

/// User-role instruction sent in place of history when the conversation is
/// reset: ask the persona to greet from scratch.
const GREETING_INSTRUCTION: &str = "请重新开始我们的对话，用你的角色设定向我打个招呼。";

/// Take the last `n` turns of `history` in original order.
pub fn window(history: &[Turn], n: usize) -> &[Turn] {
    &history[history.len().saturating_sub(n)..]
}

/// Stateless builder for upstream message sequences.
///
/// The system prompt is derived once from the persona at construction; after
/// that `build` is pure and safe to call concurrently.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system: String,
}

impl PromptBuilder {
    pub fn new(persona: &Persona) -> Self {
        Self {
            system: build_system_prompt(persona),
        }
    }

    /// Construct the message sequence for one upstream call.
    pub fn build(&self, history: &[Turn], new_message: &str) -> Vec<Turn> {
        if new_message == RESET_MARKER {
            // Reset: history is ignored entirely so the fresh greeting cannot
            // pick up prior context.
            return vec![
                Turn::system(&self.system),
                Turn::user(GREETING_INSTRUCTION),
            ];
        }

        let recent = window(history, HISTORY_WINDOW);
        let mut messages = Vec::with_capacity(recent.len() + 2);
        messages.push(Turn::system(&self.system));
        messages.extend(recent.iter().cloned());
        messages.push(Turn::user(new_message));
        messages
    }

    pub fn system_prompt(&self) -> &str {
        &self.system
    }
}

fn build_system_prompt(persona: &Persona) -> String {
    format!(
        "你是{name}，{age}岁，请严格按照以下角色设定进行对话：\n\n\
         {profile}\n\n\
         请记住：\n\
         1. 提问后常紧跟自我贬低或给对方\"出路\"的话\n\
         2. 不要开启以自己为中心的话题\n\
         3. 不要使用括号描述动作或心理\n\
         4. 保持微信聊天样式，回复不要过长\n\
         5. 不要直接复制人设档案内容\n\n\
         现在开始，你就是{name}，用符合上述设定的方式与我进行微信风格的对话。\
         你的开场应该是主动的、关心的、且卑微的提问。",
        name = persona.name,
        age = persona.age,
        profile = persona.profile,
    )
}
