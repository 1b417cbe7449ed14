/// Human-readable strings attached to progress reports. Callers embedding this crate in a
/// tool with its own localization can swap these out instead of hard-coding copy here.
#[derive(Debug, Clone)]
pub struct Messages {
    pub decode_start: String,
    pub decode_done: String,
    pub encode_start: String,
    pub encode_done: String,
    pub mca_read_start: String,
    pub mca_read_done: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            decode_start: "parsing NBT data into a tag tree".into(),
            decode_done: "parsing finished".into(),
            encode_start: "encoding tag tree to NBT data".into(),
            encode_done: "encoding finished".into(),
            mca_read_start: "reading region file".into(),
            mca_read_done: "region file read".into(),
        }
    }
}
