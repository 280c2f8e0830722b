mod auth_dto;

pub use auth_dto::{AuthUserDto, CreateAdminDto, LoginRequestDto, LoginResponseDto};
