pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const LINK: &str = "🔗";
    pub const KEY: &str = "🔑";
    pub const LOCK: &str = "🔒";
    pub const UNLOCK: &str = "🔓";
    pub const FOLDER: &str = "📁";
    pub const NEW: &str = "✨";
    pub const DEL: &str = "🗑️";
    pub const DATABASE: &str = "🗄️";
    pub const EMPTY: &str = "∅";
}
