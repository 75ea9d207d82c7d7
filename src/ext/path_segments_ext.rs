/// Splits slash-separated directory paths into their non-empty segments.
///
/// Leading, trailing and repeated slashes produce empty pieces, which are
/// dropped, so `"/a//b/"` yields `["a", "b"]`. No other normalization happens:
/// `.` and `..` are ordinary names.
pub trait PathSegmentsExt {
    fn path_segments(&self) -> impl Iterator<Item = &str>;
}

impl PathSegmentsExt for str {
    fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.split('/').filter(|segment| !segment.is_empty())
    }
}

impl PathSegmentsExt for String {
    fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.as_str().path_segments()
    }
}
