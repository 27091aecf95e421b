//! Per-platform Gradle text fragments.
//!
//! This is the only place that knows what a platform adds to a build. Fresh
//! projects fold these fragments into placeholder tokens; the `target`
//! command inserts the very same fragments into an existing build file.
//! Identity values are interpolated here, so no fragment ever contains a
//! `{{token}}` marker.

use crate::domain::{entities::ProjectIdentity, value_objects::Platform};

// ── Version catalog ──────────────────────────────────────────────────────────

/// Section of `gradle/libs.versions.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSection {
    Versions,
    Libraries,
    Plugins,
}

impl CatalogSection {
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Versions => "[versions]",
            Self::Libraries => "[libraries]",
            Self::Plugins => "[plugins]",
        }
    }
}

/// One `key = value` line of the version catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub section: CatalogSection,
    pub key: &'static str,
    pub line: &'static str,
}

const fn entry(section: CatalogSection, key: &'static str, line: &'static str) -> CatalogEntry {
    CatalogEntry { section, key, line }
}

/// Entries every Compose Multiplatform module needs.
pub const BASE_CATALOG: &[CatalogEntry] = &[
    entry(CatalogSection::Versions, "kotlin", r#"kotlin = "2.2.20""#),
    entry(CatalogSection::Versions, "compose", r#"compose = "1.9.0""#),
    entry(
        CatalogSection::Versions,
        "compose-hotreload",
        r#"compose-hotreload = "1.0.0""#,
    ),
    entry(
        CatalogSection::Plugins,
        "jetbrains-kotlin-multiplatform",
        r#"jetbrains-kotlin-multiplatform = { id = "org.jetbrains.kotlin.multiplatform", version.ref = "kotlin" }"#,
    ),
    entry(
        CatalogSection::Plugins,
        "jetbrains-compose",
        r#"jetbrains-compose = { id = "org.jetbrains.compose", version.ref = "compose" }"#,
    ),
    entry(
        CatalogSection::Plugins,
        "jetbrains-compose-compiler",
        r#"jetbrains-compose-compiler = { id = "org.jetbrains.kotlin.plugin.compose", version.ref = "kotlin" }"#,
    ),
    entry(
        CatalogSection::Plugins,
        "jetbrains-compose-hotreload",
        r#"jetbrains-compose-hotreload = { id = "org.jetbrains.compose.hot-reload", version.ref = "compose-hotreload" }"#,
    ),
];

const ANDROID_CATALOG: &[CatalogEntry] = &[
    entry(CatalogSection::Versions, "agp", r#"agp = "8.11.2""#),
    entry(
        CatalogSection::Versions,
        "android-compileSdk",
        r#"android-compileSdk = "36""#,
    ),
    entry(CatalogSection::Versions, "android-minSdk", r#"android-minSdk = "24""#),
    entry(
        CatalogSection::Versions,
        "android-targetSdk",
        r#"android-targetSdk = "36""#,
    ),
    entry(
        CatalogSection::Versions,
        "androidx-activity",
        r#"androidx-activity = "1.11.0""#,
    ),
    entry(
        CatalogSection::Libraries,
        "androidx-activitycompose",
        r#"androidx-activitycompose = { module = "androidx.activity:activity-compose", version.ref = "androidx-activity" }"#,
    ),
    entry(
        CatalogSection::Plugins,
        "android-application",
        r#"android-application = { id = "com.android.application", version.ref = "agp" }"#,
    ),
];

/// Catalog entries a platform adds on top of [`BASE_CATALOG`].
pub fn catalog_entries(platform: Platform) -> &'static [CatalogEntry] {
    match platform {
        Platform::Android => ANDROID_CATALOG,
        _ => &[],
    }
}

// ── Plugins ──────────────────────────────────────────────────────────────────

/// Plugin aliases (under `libs.plugins.`) every module applies.
pub const BASE_PLUGIN_ALIASES: [&str; 4] = [
    "jetbrains.kotlin.multiplatform",
    "jetbrains.compose",
    "jetbrains.compose.compiler",
    "jetbrains.compose.hotreload",
];

/// Extra plugin alias a platform applies, if any.
pub fn plugin_alias(platform: Platform) -> Option<&'static str> {
    match platform {
        Platform::Android => Some("android.application"),
        _ => None,
    }
}

/// `    alias(libs.plugins.<alias>)`
pub fn module_plugin_line(alias: &str) -> String {
    format!("    alias(libs.plugins.{alias})")
}

/// `    alias(libs.plugins.<alias>) apply false`
pub fn root_plugin_line(alias: &str) -> String {
    format!("    alias(libs.plugins.{alias}) apply false")
}

// ── Module build file ────────────────────────────────────────────────────────

/// Import lines a platform needs at the top of the module build file.
pub fn imports(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Android => &["import org.jetbrains.kotlin.gradle.dsl.JvmTarget"],
        Platform::Jvm => &["import org.jetbrains.compose.desktop.application.dsl.TargetFormat"],
        Platform::Ios => &[],
        Platform::Web => &[
            "import org.jetbrains.kotlin.gradle.ExperimentalWasmDsl",
            "import org.jetbrains.kotlin.gradle.targets.js.webpack.KotlinWebpackConfig",
        ],
    }
}

/// Target declarations inside `kotlin { }`, one entry per block.
pub fn kotlin_targets(platform: Platform, identity: &ProjectIdentity) -> Vec<String> {
    match platform {
        Platform::Android => vec![
            "    androidTarget {
        compilerOptions {
            jvmTarget.set(JvmTarget.JVM_11)
        }
    }"
            .to_string(),
        ],
        Platform::Jvm => vec!["    jvm()".to_string()],
        Platform::Ios => vec![format!(
            "    listOf(
        iosArm64(),
        iosSimulatorArm64()
    ).forEach {{ iosTarget ->
        iosTarget.binaries.framework {{
            baseName = \"{base}\"
            isStatic = true
        }}
    }}",
            base = identity.ios_binary_name()
        )],
        Platform::Web => {
            let output = format!("{}.js", identity.module_name());
            vec![
                format!("    js {{\n{}\n    }}", browser_block(&output)),
                format!(
                    "    @OptIn(ExperimentalWasmDsl::class)\n    wasmJs {{\n{}\n    }}",
                    browser_block(&output)
                ),
            ]
        }
    }
}

fn browser_block(output_file: &str) -> String {
    format!(
        "        browser {{
            val rootDirPath = project.rootDir.path
            val projectDirPath = project.projectDir.path
            commonWebpackConfig {{
                outputFileName = \"{output_file}\"
                devServer = (devServer ?: KotlinWebpackConfig.DevServer()).apply {{
                    static = (static ?: mutableListOf()).apply {{
                        add(rootDirPath)
                        add(projectDirPath)
                    }}
                }}
            }}
        }}
        binaries.executable()"
    )
}

/// Dependencies every module declares for `commonMain`.
pub const COMMON_DEPENDENCIES: &str = "        commonMain.dependencies {
            implementation(compose.runtime)
            implementation(compose.foundation)
            implementation(compose.material3)
            implementation(compose.components.resources)
            implementation(compose.components.uiToolingPreview)
        }";

/// Platform dependency block inside `sourceSets { }`.
pub fn dependencies(platform: Platform) -> &'static str {
    match platform {
        Platform::Android => {
            "        androidMain.dependencies {
            implementation(compose.preview)
            implementation(libs.androidx.activitycompose)
        }"
        }
        Platform::Jvm => {
            "        jvmMain.dependencies {
            implementation(compose.desktop.currentOs)
        }"
        }
        Platform::Ios => {
            "        iosMain.dependencies {
            implementation(compose.material3)
        }"
        }
        Platform::Web => {
            "        webMain.dependencies {
            implementation(compose.material3)
        }"
        }
    }
}

/// Top-level configuration block appended after `kotlin { }`, if any.
pub fn configuration_block(platform: Platform, identity: &ProjectIdentity) -> Option<String> {
    let namespace = identity.namespace();
    match platform {
        Platform::Android => Some(format!(
            "android {{
    namespace = \"{namespace}\"
    compileSdk = libs.versions.android.compileSdk.get().toInt()

    defaultConfig {{
        applicationId = \"{namespace}\"
        minSdk = libs.versions.android.minSdk.get().toInt()
        targetSdk = libs.versions.android.targetSdk.get().toInt()
        versionCode = 1
        versionName = \"1.0\"
    }}
    packaging {{
        resources {{
            excludes += \"/META-INF/{{AL2.0,LGPL2.1}}\"
        }}
    }}
    buildTypes {{
        getByName(\"release\") {{
            isMinifyEnabled = false
        }}
    }}
    compileOptions {{
        sourceCompatibility = JavaVersion.VERSION_11
        targetCompatibility = JavaVersion.VERSION_11
    }}
}}"
        )),
        Platform::Jvm => Some(format!(
            "compose.desktop {{
    application {{
        mainClass = \"{namespace}.MainKt\"

        nativeDistributions {{
            targetFormats(TargetFormat.Dmg, TargetFormat.Msi, TargetFormat.Deb)
            packageName = \"{namespace}\"
            packageVersion = \"1.0.0\"
        }}
    }}
}}"
        )),
        Platform::Ios | Platform::Web => None,
    }
}

// ── gradle.properties ────────────────────────────────────────────────────────

/// Property that proves the Android block is present.
pub const ANDROID_PROPERTIES_MARKER: &str = "android.useAndroidX";

pub const ANDROID_PROPERTIES: &str =
    "#Android\nandroid.nonTransitiveRClass=true\nandroid.useAndroidX=true\n";

/// Appended to an existing `gradle.properties` when android is added later.
pub const ANDROID_PROPERTIES_APPENDED: &str =
    "#Android\nandroid.useAndroidX=true\nandroid.nonTransitiveRClass=true\n";
