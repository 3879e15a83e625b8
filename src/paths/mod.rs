mod path_resolver;

pub use path_resolver::{PathResolver, normalize_path, resolve_from};
