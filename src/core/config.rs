use log::LevelFilter;

pub trait AvatarConfig: Send + Sync {
    fn base_url(&self) -> &str;
    fn image_size(&self) -> u32;
    fn email_index(&self) -> usize;
}

pub trait Config: Send + Sync {
    fn data_dir(&self) -> &str;

    fn avatar(&self) -> Option<Box<dyn AvatarConfig>>;

    fn log_level(&self) -> LevelFilter;
    fn log_file(&self) -> Option<String>;

    #[cfg(feature = "inspect")]
    fn dump(&self);
}
