//! Database schema definitions
//!
//! Foreign keys carry no `ON DELETE` action: children must be removed
//! before their parents.

/// SQL to create the versions table
pub const CREATE_VERSIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS versions (
    version_code TEXT PRIMARY KEY NOT NULL,
    version_name TEXT NOT NULL UNIQUE,
    created TEXT
)
"#;

/// SQL to create the types lookup table
pub const CREATE_TYPES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS types (
    type_id INTEGER PRIMARY KEY,
    type_name TEXT NOT NULL
)
"#;

/// SQL to create the modules table
pub const CREATE_MODULES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS modules (
    module_id INTEGER PRIMARY KEY,
    module_name TEXT NOT NULL,
    created TEXT,
    version_id TEXT NOT NULL REFERENCES versions(version_code)
)
"#;

/// SQL to create the classes table
pub const CREATE_CLASSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS classes (
    class_id INTEGER PRIMARY KEY,
    class_name TEXT NOT NULL,
    description TEXT,
    module_id INTEGER NOT NULL REFERENCES modules(module_id)
)
"#;

/// SQL to create the methods table
pub const CREATE_METHODS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS methods (
    method_id INTEGER PRIMARY KEY,
    method_name TEXT NOT NULL,
    human_test_coverage REAL,
    fuzzer_test_coverage REAL,
    description TEXT,
    created TEXT,
    class_id INTEGER NOT NULL REFERENCES classes(class_id),
    version_id TEXT REFERENCES versions(version_code)
)
"#;

/// SQL to create the method_args table
/// `default_value` holds a JSON scalar
pub const CREATE_METHOD_ARGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS method_args (
    argument_id INTEGER PRIMARY KEY,
    argument_name TEXT NOT NULL,
    description TEXT,
    default_value TEXT,
    method_id INTEGER NOT NULL REFERENCES methods(method_id),
    type_id INTEGER REFERENCES types(type_id)
)
"#;

/// SQL to create indexes on foreign key and lookup columns
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_modules_version ON modules(version_id)",
    "CREATE INDEX IF NOT EXISTS idx_modules_name ON modules(module_name)",
    "CREATE INDEX IF NOT EXISTS idx_classes_module ON classes(module_id)",
    "CREATE INDEX IF NOT EXISTS idx_classes_name ON classes(class_name)",
    "CREATE INDEX IF NOT EXISTS idx_methods_class ON methods(class_id)",
    "CREATE INDEX IF NOT EXISTS idx_methods_version ON methods(version_id)",
    "CREATE INDEX IF NOT EXISTS idx_methods_name ON methods(method_name)",
    "CREATE INDEX IF NOT EXISTS idx_method_args_method ON method_args(method_id)",
    "CREATE INDEX IF NOT EXISTS idx_types_name ON types(type_name)",
];

/// All schema creation statements, parents before children
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_VERSIONS_TABLE,
        CREATE_TYPES_TABLE,
        CREATE_MODULES_TABLE,
        CREATE_CLASSES_TABLE,
        CREATE_METHODS_TABLE,
        CREATE_METHOD_ARGS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
