//! Fixed texts: the system instruction sent to the model and every canned
//! reply the bot produces.

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful AI that remembers past conversations.";

pub const MENU_TITLE: &str = "🤖 Deepseek Bot Menu:";
pub const MENU_ASK: &str = "📝 Ask a Question";
pub const MENU_UPLOAD: &str = "📁 Upload a Code File";
pub const MENU_CLEAR: &str = "🧹 Clear Chat History";
pub const MENU_ABOUT: &str = "🧠 About";

pub const ABOUT_TEXT: &str =
    "🤖 *Deepseek AI Bot*\nBuilt to assist with smart replies, code fixes, and file handling.";
pub const HISTORY_CLEARED: &str = "🧹 Chat history cleared.";
pub const SEND_PROMPT: &str = "✅ Now send your message or upload a code file.";

pub const WORKING: &str = "⏳ Forming response...";
pub const TOO_LONG: &str = "⚠️ Response too long to show here.";
pub const ERROR_PREFIX: &str = "❌ Error: ";

pub const CORRECTED_CAPTION: &str = "✅ Corrected code file.";
pub const FILE_RECEIVED: &str = "📂 File received. I'll analyze it soon.";
