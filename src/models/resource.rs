//! 资源选择模型
//!
//! 文件 / 外部视频 URL 两种互斥的输入模式。切换模式只交换
//! "必填"标记，不清空另一分支已填的值，来回切换不丢输入。

/// 资源输入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceMode {
    /// 本地文件（默认分支）
    #[default]
    File,
    /// 外部视频 URL
    ExternalUrl,
}

/// 待上传的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// 文件名
    pub file_name: String,
    /// 文件内容
    pub bytes: Vec<u8>,
}

impl FileHandle {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// 资源选择状态
#[derive(Debug, Clone, Default)]
pub struct ResourceSelection {
    mode: ResourceMode,
    file: Option<FileHandle>,
    url: String,
    file_required: bool,
    url_required: bool,
}

impl ResourceSelection {
    /// 创建默认选择（文件模式，文件分支必填）
    pub fn new() -> Self {
        Self {
            mode: ResourceMode::File,
            file: None,
            url: String::new(),
            file_required: true,
            url_required: false,
        }
    }

    /// 切换输入模式
    ///
    /// 只交换必填标记，两个分支的已填值都保留。
    pub fn set_mode(&mut self, mode: ResourceMode) {
        self.mode = mode;
        match mode {
            ResourceMode::File => {
                self.file_required = true;
                self.url_required = false;
            }
            ResourceMode::ExternalUrl => {
                self.file_required = false;
                self.url_required = true;
            }
        }
    }

    /// 当前模式
    pub fn mode(&self) -> ResourceMode {
        self.mode
    }

    /// 选择文件
    pub fn choose_file(&mut self, file: FileHandle) {
        self.file = Some(file);
    }

    /// 已选文件
    pub fn file(&self) -> Option<&FileHandle> {
        self.file.as_ref()
    }

    /// 写入 URL 输入
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// 当前 URL 输入（原始文本）
    pub fn url(&self) -> &str {
        &self.url
    }

    /// 文件分支是否必填
    pub fn file_required(&self) -> bool {
        self.file_required
    }

    /// URL 分支是否必填
    pub fn url_required(&self) -> bool {
        self.url_required
    }

    /// 重置为初始状态（回到文件模式，清空两个分支）
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
