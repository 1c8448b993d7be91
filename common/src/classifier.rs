//! スキルカテゴリの推定
//!
//! 順序付きのパターン表を上から評価し、最初に一致したグループのカテゴリを返す。
//! どれにも一致しない場合は、スキルが書かれていた列のデフォルトカテゴリを使う。
//!
//! 各エイリアスは正規表現の断片で、文字列全体に大文字小文字を区別せず一致させる。
//! `.` は任意の1文字（"material.ui" は "material-ui" にも "material ui" にも一致）、
//! `\.` はドットそのもの。

use crate::types::Category;
use lazy_static::lazy_static;
use regex::Regex;

const BACKEND_LANGUAGES: &[&str] = &[
    "php", "python", "java", "ruby", "go", "rust", "c#", r"c\+\+", "sql",
];

/// 文脈で判断できないため常にフロントエンド扱い
const SCRIPT_LANGUAGES: &[&str] = &["javascript", "typescript"];

const MOBILE_LANGUAGES: &[&str] = &["swift", "kotlin", "objective-c"];

const FRONTEND_TECH: &[&str] = &[
    "react", "vue", "angular", "html", "css", "scss", "sass", "less", "jquery", "svelte",
    r"next\.?js?", r"nuxt\.?js?", "vite", "webpack", "parcel", "rollup", "babel", "tailwind",
    "bootstrap", "mui", "material.ui", "styled.components", "emotion", "chakra.ui",
    "ant.design", "blade", "twig", "smarty", "wireui", "livewire", "react.hook.form",
    "react.router.dom", "playwright",
];

const BACKEND_FRAMEWORKS: &[&str] = &[
    "laravel", "symfony", "codeigniter", "rails", "django", "flask", "fastapi", "spring",
    "express", r"nest\.?js?", "koa", "hapi", "gin", "echo", "fiber", r"asp\.?net", "node",
    r"node\.js", "pest", "phpunit", "php.unit",
];

const MOBILE_FRAMEWORKS: &[&str] = &[
    "react.native", "flutter", "expo", "swiftui", "jetpack.compose", "xamarin", "ionic",
    "cordova", "phonegap", "android", "ios",
];

const INFRASTRUCTURE: &[&str] = &[
    "postgresql", "mysql", "oracle", "sql.server", "mongodb", "redis", "elasticsearch", "aws",
    "gcp", "google.cloud", "azure", "docker", "kubernetes", "k8s", "terraform", "ansible",
    "jenkins", "gitlab.ci", "github.actions", "nginx", "apache", "linux", "ubuntu", "centos",
    "rhel",
];

const DEVELOPER_TOOLS: &[&str] = &[
    // バージョン管理・エディタ
    "git", "github", "gitlab", "bitbucket", "svn", r"git\.copilot", "copilot", "vscode",
    "intellij", "phpstorm", "webstorm", "sublime", "atom", "vim", "emacs",
    // コラボレーション・デザイン
    "postman", "insomnia", "jira", "confluence", "slack", "teams", "discord", "figma", "sketch",
    r"adobe\.xd", "photoshop", "illustrator",
    // パッケージ管理・ビルド
    "npm", "yarn", "pnpm", "composer", "pip", "maven", "gradle", "cmake", "makefile",
    "dockerfile", "vagrant", "virtualbox", "vmware",
    // デバッグ・デスクトップ
    "wireshark", "charles", "fiddler", r"chrome\.devtools", r"firefox\.devtools", "xcode",
    r"android\.studio", "unity", "unreal", "blender", "obs", "ffmpeg", "handbrake", "7zip",
    "winrar", r"notepad\+\+",
    // シェル・コマンド
    "terminal", "iterm", "powershell", "bash", "zsh", "fish", r"oh\.my\.zsh", "tmux", "screen",
    "htop", "top", "ps", "netstat", "lsof", "grep", "sed", "awk", "curl", "wget", "ssh", "scp",
    "rsync", "cron", "systemd", "supervisord", "pm2", "forever", "nodemon", "concurrently",
    r"cross\.env", "dotenv",
    // リンター・リリース
    "eslint", "prettier", "stylelint", "husky", r"lint\.staged", "commitizen",
    r"conventional\.commits", r"semantic\.release", "storybook", "chromatic", "percy",
    // テスト
    "cypress", "selenium", "webdriver", "puppeteer", "jest", "mocha", "chai", "jasmine", "karma",
    "qunit", "tap", "ava", "vitest", r"testing\.library", "enzyme", "sinon", "nock", "supertest",
    "artillery", "k6", "jmeter", "gatling",
    // 品質・依存関係
    "sonarqube", "sonar", "snyk", "dependabot", "renovate", "greenkeeper", "david", "bundlesize",
    "lighthouse", r"web\.vitals", "gtmetrics", "pingdom",
    // 監視・APM
    r"new\.relic", "datadog", "splunk", "elk", "grafana", "prometheus", "jaeger", "zipkin",
    "sentry", "bugsnag", "rollbar", "loggly", "papertrail", "cloudwatch", "stackdriver",
    r"azure\.monitor", r"application\.insights",
    // 分析
    "mixpanel", r"google\.analytics", r"adobe\.analytics", "hotjar", "fullstory", "logrocket",
    "amplitude", "segment", "rudderstack", "snowplow",
    // ホスティング・BaaS・CDN
    "firebase", "supabase", "planetscale", "neon", "vercel", "netlify", "heroku", "railway",
    "render", r"fly\.io", "digitalocean", "linode", "vultr", "cloudflare", "fastly", "cloudfront",
    "maxcdn", "keycdn", "bunnycdn",
    // 決済・メッセージング・SaaS
    "stripe", "paypal", "square", "braintree", "adyen", "klarna", "afterpay", "twilio",
    "sendgrid", "mailgun", "mailchimp", r"constant\.contact", "hubspot", "salesforce",
    "zendesk", "intercom", "drift", "crisp", r"tawk\.to", "freshchat", "livechat", "olark",
    "purechat", "zopim", "typeform", "jotform",
    // WordPress
    r"gravity\.forms", r"contact\.form\.7", r"ninja\.forms", "wpforms", "elementor", "divi",
    r"beaver\.builder", "gutenberg", "acf", "yoast", "rankmath", "jetpack", "wordfence",
    "sucuri", r"w3\.total\.cache", r"wp\.rocket", "litespeed", r"nginx\.helper",
    r"redis\.cache",
    // キャッシュ・プロファイラ
    "memcached", "opcache", "apcu", "xcache", "wincache", r"query\.monitor", r"debug\.bar",
    "xdebug", "blackfire", "tideways", r"pagespeed\.insights",
];

const TEST_FRAMEWORKS: &[&str] = &[
    "jest", "mocha", "chai", "jasmine", "karma", "qunit", "tap", "ava", "vitest", "cypress",
    "selenium", "rspec", "minitest", "junit", "testng", "mockito", "powermock", "easymock",
    "wiremock",
];

/// 分類ルール（評価順）
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Backend, BACKEND_LANGUAGES),
    (Category::Frontend, SCRIPT_LANGUAGES),
    (Category::Mobile, MOBILE_LANGUAGES),
    (Category::Frontend, FRONTEND_TECH),
    (Category::Backend, BACKEND_FRAMEWORKS),
    (Category::Mobile, MOBILE_FRAMEWORKS),
    (Category::Devops, INFRASTRUCTURE),
    (Category::Tools, DEVELOPER_TOOLS),
    (Category::Tools, TEST_FRAMEWORKS),
];

lazy_static! {
    static ref COMPILED_RULES: Vec<(Category, Regex)> = CATEGORY_RULES
        .iter()
        .map(|(category, aliases)| {
            let pattern = format!("(?i)^(?:{})$", aliases.join("|"));
            (*category, Regex::new(&pattern).unwrap())
        })
        .collect();
}

/// スキル名からカテゴリを推定する
///
/// # Arguments
/// * `name` - クリーンアップ済みのスキル名
/// * `default_category` - どのルールにも一致しない場合のカテゴリ（列ごとの既定値）
pub fn classify(name: &str, default_category: Category) -> Category {
    let skill = name.trim().to_lowercase();

    COMPILED_RULES
        .iter()
        .find(|(_, re)| re.is_match(&skill))
        .map(|(category, _)| *category)
        .unwrap_or(default_category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_languages() {
        assert_eq!(classify("PHP", Category::Tools), Category::Backend);
        assert_eq!(classify("C#", Category::Devops), Category::Backend);
        assert_eq!(classify("C++", Category::Devops), Category::Backend);
        assert_eq!(classify("Go", Category::Tools), Category::Backend);
    }

    #[test]
    fn test_script_languages_default_to_frontend() {
        assert_eq!(classify("JavaScript", Category::Backend), Category::Frontend);
        assert_eq!(classify("TypeScript", Category::Devops), Category::Frontend);
    }

    #[test]
    fn test_frontend_patterns() {
        assert_eq!(classify("React", Category::Devops), Category::Frontend);
        assert_eq!(classify("Next.js", Category::Tools), Category::Frontend);
        assert_eq!(classify("nextjs", Category::Tools), Category::Frontend);
        assert_eq!(classify("Material-UI", Category::Tools), Category::Frontend);
        assert_eq!(classify("styled components", Category::Tools), Category::Frontend);
    }

    #[test]
    fn test_backend_frameworks() {
        assert_eq!(classify("Laravel", Category::Tools), Category::Backend);
        assert_eq!(classify("ASP.NET", Category::Tools), Category::Backend);
        assert_eq!(classify("Node.js", Category::Tools), Category::Backend);
        assert_eq!(classify("PHPUnit", Category::Tools), Category::Backend);
    }

    #[test]
    fn test_mobile() {
        assert_eq!(classify("Swift", Category::Backend), Category::Mobile);
        assert_eq!(classify("Objective-C", Category::Backend), Category::Mobile);
        assert_eq!(classify("React Native", Category::Tools), Category::Mobile);
        assert_eq!(classify("Jetpack Compose", Category::Tools), Category::Mobile);
    }

    #[test]
    fn test_devops() {
        assert_eq!(classify("AWS", Category::Backend), Category::Devops);
        assert_eq!(classify("PostgreSQL", Category::Tools), Category::Devops);
        assert_eq!(classify("GitHub Actions", Category::Tools), Category::Devops);
        assert_eq!(classify("SQL Server", Category::Tools), Category::Devops);
    }

    #[test]
    fn test_tools() {
        assert_eq!(classify("Git", Category::Backend), Category::Tools);
        assert_eq!(classify("Notepad++", Category::Backend), Category::Tools);
        assert_eq!(classify("Firebase", Category::Devops), Category::Tools);
        assert_eq!(classify("New.Relic", Category::Devops), Category::Tools);
        assert_eq!(classify("RSpec", Category::Backend), Category::Tools);
        assert_eq!(classify("JUnit", Category::Backend), Category::Tools);
    }

    #[test]
    fn test_literal_dot_aliases() {
        // `\.` はドットのみに一致する
        assert_eq!(classify("new relic", Category::Devops), Category::Devops);
    }

    #[test]
    fn test_whole_string_match_only() {
        assert_eq!(classify("React Hooks", Category::Tools), Category::Tools);
        assert_eq!(classify("Javaの保守", Category::Devops), Category::Devops);
    }

    #[test]
    fn test_unknown_uses_default() {
        assert_eq!(classify("Backlog", Category::Tools), Category::Tools);
        assert_eq!(classify("COBOL", Category::Backend), Category::Backend);
        assert_eq!(classify("", Category::Devops), Category::Devops);
    }

    #[test]
    fn test_first_rule_wins() {
        // "jest" は開発ツール表とテスト表の両方にあるが結果は同じ tools
        assert_eq!(classify("Jest", Category::Frontend), Category::Tools);
        // "node" はバックエンドフレームワーク表が先
        assert_eq!(classify("node", Category::Tools), Category::Backend);
    }
}
