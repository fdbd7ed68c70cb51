//! Interview script and storyboard constants and validation.

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::require_non_empty;

/// Version label given to a new script when none is supplied.
pub const DEFAULT_SCRIPT_VERSION: &str = "v1.0";

/// Shot number given to a new storyboard frame when none is supplied.
pub const DEFAULT_SHOT_NO: &str = "1A";

/// Accepted storyboard image extensions.
pub const STORYBOARD_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    require_non_empty("title", title)
}

/// Validate a storyboard image file name by extension.
pub fn validate_storyboard_image(file_name: &str) -> Result<(), CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if STORYBOARD_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported storyboard image '{file_name}'. Supported: .png, .jpg, .jpeg"
        )))
    }
}

/// Display label for a storyboard frame.
pub fn storyboard_label(script_id: DbId, shot_no: &str) -> String {
    format!("Script #{script_id} - Shot {shot_no}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_required() {
        assert!(validate_title(" ").is_err());
        assert!(validate_title("Founder interview").is_ok());
    }

    #[test]
    fn storyboard_images_by_extension() {
        assert!(validate_storyboard_image("frame.PNG").is_ok());
        assert!(validate_storyboard_image("frame.jpeg").is_ok());
        assert!(validate_storyboard_image("frame.psd").is_err());
        assert!(validate_storyboard_image("frame").is_err());
    }

    #[test]
    fn storyboard_label_names_script_and_shot() {
        assert_eq!(storyboard_label(4, "2B"), "Script #4 - Shot 2B");
    }
}
