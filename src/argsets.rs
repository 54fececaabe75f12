use std::path::PathBuf;

pub struct GenerateArgs {
    pub schema: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub format: Option<String>,
}

pub struct SchemaArgs {
    pub schema: Option<PathBuf>,
}

pub struct LabelArgs {
    pub schema: Option<PathBuf>,
    pub code: String,
}

pub struct UsageArgs {
    pub schema: Option<PathBuf>,
    /// Resolve as a command even if the code lacks the CMD flag
    pub command: bool,
    pub code: String,
}

pub struct CompatibleArgs {
    pub schema: Option<PathBuf>,
    pub dst: String,
    pub src: String,
}
