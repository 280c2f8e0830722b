mod banner_dto;

pub use banner_dto::{BannerResponseDto, CreateBannerDto, UpdateBannerDto};
