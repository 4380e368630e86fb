#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the connection table inside a zip archive.
    pub file_name: String,
    pub delimiter: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_name: "connection_graph.csv".into(),
            delimiter: b',',
        }
    }
}
