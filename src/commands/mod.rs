pub mod draft;
pub mod entries;
pub mod query;
pub mod recorder;
pub mod view;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_mapping_covers_common_image_types() {
        assert_eq!(draft::mime_for_path("a.jpeg"), "image/jpeg");
        assert_eq!(draft::mime_for_path("a.webp"), "image/webp");
    }
}
