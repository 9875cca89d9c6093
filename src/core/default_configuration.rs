use std::env;
use std::fmt;
use std::fs;
use serde::Deserialize;
use log::LevelFilter;

use crate::{
    Error,
    core::{
        config::Config,
        config::AvatarConfig,
        Result
    },
};

pub const DEFAULT_AVATAR_BASE: &str = "https://www.gravatar.com";
pub const DEFAULT_IMAGE_SIZE: u32 = 512;

#[derive(Clone, Deserialize)]
struct LogCfg {
    #[serde(rename = "level")]
    level   : String,
    #[serde(rename = "logFile")]
    file    : Option<String>,

    #[serde(skip)]
    deserde_level: Option<LevelFilter>,
}

#[derive(Clone, Deserialize)]
struct AvatarCfg {
    #[serde(rename = "baseUrl")]
    base_url    : Option<String>,
    #[serde(rename = "imageSize")]
    image_size  : Option<u32>,
    #[serde(rename = "emailIndex")]
    email_index : Option<usize>,
}

#[derive(Clone, Deserialize)]
struct Configuration {
    #[serde(rename = "dataDir")]
    data_dir    : String,

    #[serde(rename = "avatar")]
    avatar      : Option<AvatarCfg>,

    #[serde(rename = "logger")]
    logger      : Option<LogCfg>,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dataDir: {}, avatar: {}?s={}",
            self.data_dir,
            self.avatar.as_ref()
                .and_then(|v| v.base_url.as_deref())
                .unwrap_or(DEFAULT_AVATAR_BASE),
            self.avatar.as_ref()
                .and_then(|v| v.image_size)
                .unwrap_or(DEFAULT_IMAGE_SIZE))
    }
}

pub struct Builder<'a> {
    data_dir    : Option<String>,

    avatar_base : Option<&'a str>,
    image_size  : Option<u32>,
    email_index : Option<usize>,

    log_level   : Option<LevelFilter>,
    log_file    : Option<&'a str>,

    cfg         : Option<Configuration>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Builder<'a> {
        Self {
            data_dir    : None,
            avatar_base : None,
            image_size  : None,
            email_index : None,
            log_level   : None,
            log_file    : None,
            cfg         : None,
        }
    }

    pub fn with_data_dir(&mut self, input: &str) -> &mut Self {
        let mut data_dir = String::new();
        if input.starts_with("~") {
            data_dir += &input[1..];
        } else {
            data_dir += input;
        }
        self.data_dir = Some(data_dir);
        self
    }

    pub fn with_avatar_base(&mut self, base_url: &'a str) -> &mut Self {
        self.avatar_base = Some(base_url);
        self
    }

    pub fn with_image_size(&mut self, size: u32) -> &mut Self {
        self.image_size = Some(size);
        self
    }

    pub fn with_email_index(&mut self, index: usize) -> &mut Self {
        self.email_index = Some(index);
        self
    }

    pub fn with_logger(&mut self, level: LevelFilter, file: Option<&'a str>) -> &mut Self {
        self.log_level = Some(level);
        self.log_file = file;
        self
    }

    pub fn load(&mut self, input: &str) -> Result<&mut Self> {
        let data = fs::read_to_string(input).map_err(|e| {
            Error::Io(format!("Reading config error: {}", e))
        })?;

        let cfg = serde_json::from_str::<Configuration>(&data).map_err(|e| {
            Error::Argument(format!("bad config, error: {}", e))
        })?;

        self.cfg = Some(cfg);
        Ok(self)
    }

    pub fn build(&mut self) -> Result<Box<dyn Config>> {
        Ok(Box::new(Configuration::new(self)?))
    }
}

impl Configuration {
    fn new(b: &Builder) -> Result<Self> {
        let mut cfg = match b.cfg.as_ref() {
            Some(cfg) => cfg.clone(),
            None => Self {
                data_dir    : env::var("HOME").unwrap_or_else(|_| ".".into()),
                avatar      : None,
                logger      : None,
            }
        };

        if let Some(dir) = b.data_dir.as_ref() {
            cfg.data_dir = dir.to_string();
        }

        if b.avatar_base.is_some() || b.image_size.is_some() || b.email_index.is_some() {
            let mut avatar = cfg.avatar.clone().unwrap_or(AvatarCfg {
                base_url    : None,
                image_size  : None,
                email_index : None,
            });
            if let Some(base) = b.avatar_base {
                avatar.base_url = Some(base.to_string());
            }
            if let Some(size) = b.image_size {
                avatar.image_size = Some(size);
            }
            if let Some(index) = b.email_index {
                avatar.email_index = Some(index);
            }
            cfg.avatar = Some(avatar);
        }

        if let Some(ref mut logger) = cfg.logger {
            if let Some(level) = logger.level.parse::<LevelFilter>().ok() {
                logger.deserde_level = Some(level);
            } else {
                logger.deserde_level = Some(LevelFilter::Info);
            }
        } else {
            cfg.logger = Some(LogCfg {
                level: b.log_level.unwrap_or(LevelFilter::Info).to_string(),
                file: b.log_file.map(|f| f.to_string()),
                deserde_level: Some(b.log_level.unwrap_or(LevelFilter::Info)),
            });
        }

        Ok(cfg)
    }
}

impl Config for Configuration {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn avatar(&self) -> Option<Box<dyn AvatarConfig>> {
        self.avatar.as_ref().map(|v|
            Box::new(v.clone()) as Box<dyn AvatarConfig>
        )
    }

    fn log_level(&self) -> LevelFilter {
        self.logger.as_ref()
            .and_then(|v| v.deserde_level)
            .unwrap_or(LevelFilter::Info)
    }

    fn log_file(&self) -> Option<String> {
        self.logger.as_ref().and_then(|v| v.file.clone())
    }

    #[cfg(feature = "inspect")]
    fn dump(&self) {
        println!("config: {}", self);
    }
}

impl AvatarConfig for AvatarCfg {
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_AVATAR_BASE)
    }

    fn image_size(&self) -> u32 {
        self.image_size.unwrap_or(DEFAULT_IMAGE_SIZE)
    }

    fn email_index(&self) -> usize {
        self.email_index.unwrap_or(0)
    }
}
