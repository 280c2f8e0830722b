mod image_dto;

pub use image_dto::{
    get_extension_from_content_type, is_mime_type_allowed, DeleteImageByUrlDto,
    DeleteImageResponseDto, ImageResponseDto, UploadImageDto, ALLOWED_IMAGE_MIME_TYPES,
    MAX_IMAGE_SIZE,
};
