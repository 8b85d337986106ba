/// Executable name used by the system-CLI backend.
pub const DEFAULT_SYSTEM_EXECUTABLE: &str = "typst";
/// Font directory searched when none is configured.
pub const DEFAULT_FONT_DIR: &str = "fonts";
/// Workspace root used when none is configured.
pub const DEFAULT_WORKSPACE: &str = ".";
/// Selector for the frontmatter metadata element.
pub const FRONTMATTER_SELECTOR: &str = "<11typst:frontmatter>";

/// `sys.inputs` key carrying the serialized page data.
pub const INPUT_DATA_KEY: &str = "eleventyData";
/// `sys.inputs` key carrying the environment name.
pub const INPUT_ENVIRONMENT_KEY: &str = "environment";
/// `sys.inputs` key carrying the build timestamp.
pub const INPUT_BUILD_DATE_KEY: &str = "buildDate";

/// Host environment variable naming the run mode (`build`, `serve`, `watch`).
pub const RUN_MODE_ENV: &str = "ELEVENTY_RUN_MODE";
/// Host environment variable naming the deployment environment.
pub const ENVIRONMENT_ENV: &str = "NODE_ENV";

/// File name of the dependency manifest inside its per-invocation temp dir.
pub const MANIFEST_FILE_NAME: &str = "deps.json";
