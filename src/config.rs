/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 服务端基础地址
    pub server_base_url: String,
    /// 进度轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 成功提示展示时长（毫秒），之后才跳转
    pub redirect_delay_ms: u64,
    /// 作业请求超时（秒），生成任务较慢，默认给足
    pub request_timeout_secs: u64,
    /// 校验策略："sum"（总和区间）或 "target"（目标总数）
    pub validation_policy: String,
    /// 总和区间下限
    pub total_min: i64,
    /// 总和区间上限
    pub total_max: i64,
    /// 目标总数（target 策略）
    pub target_total: i64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- 无头驱动输入 ---
    pub question_type: String,
    pub easy_count: i64,
    pub medium_count: i64,
    pub difficult_count: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_base_url: "http://127.0.0.1:5000".to_string(),
            poll_interval_ms: 500,
            redirect_delay_ms: 500,
            request_timeout_secs: 300,
            validation_policy: "sum".to_string(),
            total_min: 1,
            total_max: 10,
            target_total: 10,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            question_type: "Multiple Choice".to_string(),
            easy_count: 2,
            medium_count: 2,
            difficult_count: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            server_base_url: std::env::var("SERVER_BASE_URL").unwrap_or(default.server_base_url),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            redirect_delay_ms: std::env::var("REDIRECT_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.redirect_delay_ms),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            validation_policy: std::env::var("VALIDATION_POLICY").unwrap_or(default.validation_policy),
            total_min: std::env::var("TOTAL_MIN").ok().and_then(|v| v.parse().ok()).unwrap_or(default.total_min),
            total_max: std::env::var("TOTAL_MAX").ok().and_then(|v| v.parse().ok()).unwrap_or(default.total_max),
            target_total: std::env::var("TARGET_TOTAL").ok().and_then(|v| v.parse().ok()).unwrap_or(default.target_total),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            question_type: std::env::var("QUESTION_TYPE").unwrap_or(default.question_type),
            easy_count: std::env::var("EASY_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.easy_count),
            medium_count: std::env::var("MEDIUM_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.medium_count),
            difficult_count: std::env::var("DIFFICULT_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.difficult_count),
        }
    }

    /// 轮询间隔
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }

    /// 跳转前延迟
    pub fn redirect_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.redirect_delay_ms)
    }
}
