use serde::{Deserialize, Serialize};

/// Editor language tag derived from a file name.
///
/// Names without an extension, or with one that is not in the table, map to
/// [`LanguageTag::Cpp`] rather than to an "unknown" tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Python,
    C,
    #[default]
    Cpp,
    Java,
    JavaScript,
    TypeScript,
    Ruby,
    CSharp,
    Go,
    Rust,
    Php,
    Html,
    Css,
    Json,
    Markdown,
    PlainText,
}

impl LanguageTag {
    pub fn from_file_name(name: &str) -> Self {
        match extension(name) {
            Some(ext) => Self::from_extension(&ext).unwrap_or_default(),
            None => Self::default(),
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let tag = match ext.to_ascii_lowercase().as_str() {
            "py" => Self::Python,
            "c" => Self::C,
            "cpp" | "h" | "hpp" => Self::Cpp,
            "java" => Self::Java,
            "js" | "jsx" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "rb" => Self::Ruby,
            "cs" => Self::CSharp,
            "go" => Self::Go,
            "rs" => Self::Rust,
            "php" => Self::Php,
            "html" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "md" => Self::Markdown,
            "txt" => Self::PlainText,
            _ => return None,
        };
        Some(tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Ruby => "ruby",
            Self::CSharp => "csharp",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Php => "php",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::PlainText => "plaintext",
        }
    }
}

/// Lower-cased text after the last `.`, if the name has one.
fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// A language offered by the execution backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionLanguage {
    pub id: u32,
    pub name: String,
}

impl ExecutionLanguage {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Extension used for new untitled files while this language is selected.
    pub fn default_extension(&self) -> &'static str {
        let name = self.name.to_ascii_lowercase();
        if name.contains("python") {
            "py"
        } else if name.contains("c++") {
            "cpp"
        } else if name.contains("c ") {
            "c"
        } else if name.contains("javascript") {
            "js"
        } else if name.contains("java") {
            "java"
        } else if name.contains("ruby") {
            "rb"
        } else if name.contains("c#") {
            "cs"
        } else if name.contains("go") {
            "go"
        } else if name.contains("rust") {
            "rs"
        } else if name.contains("php") {
            "php"
        } else {
            DEFAULT_EXTENSION
        }
    }
}

pub const DEFAULT_EXTENSION: &str = "cpp";
pub const DEFAULT_EXECUTION_LANGUAGE_ID: u32 = 54;

/// Languages assumed when the backend's language list cannot be fetched.
pub fn fallback_execution_languages() -> Vec<ExecutionLanguage> {
    vec![
        ExecutionLanguage::new(54, "C++ (GCC 14.1.0)"),
        ExecutionLanguage::new(50, "C (GCC 14.1.0)"),
        ExecutionLanguage::new(62, "Java (OpenJDK 17.0.3)"),
        ExecutionLanguage::new(71, "Python (3.10.4)"),
        ExecutionLanguage::new(63, "JavaScript (Node.js 18.2.0)"),
    ]
}

/// Picks the initial execution language: the saved choice, then the
/// configured id, then any GCC C++ entry, then the first entry.
pub fn pick_execution_language<'a>(
    languages: &'a [ExecutionLanguage],
    saved: Option<u32>,
    configured: Option<u32>,
) -> Option<&'a ExecutionLanguage> {
    let by_id = |id: u32| languages.iter().find(|lang| lang.id == id);
    saved
        .and_then(by_id)
        .or_else(|| configured.and_then(by_id))
        .or_else(|| {
            languages
                .iter()
                .find(|lang| lang.name.contains("C++ (GCC 14.1.0)"))
        })
        .or_else(|| languages.iter().find(|lang| lang.name.contains("C++ (GCC")))
        .or_else(|| languages.first())
}

/// Backend language whose name matches the file's extension, if any.
pub fn execution_language_for_file<'a>(
    languages: &'a [ExecutionLanguage],
    file_name: &str,
) -> Option<&'a ExecutionLanguage> {
    let hint = match extension(file_name).as_deref() {
        Some("py") => "Python",
        Some("c") => "C (",
        Some("java") => "Java",
        Some("js") => "JavaScript",
        Some("rb") => "Ruby",
        Some("cs") => "C#",
        Some("go") => "Go",
        Some("rs") => "Rust",
        Some("php") => "PHP",
        _ => "C++",
    };
    languages.iter().find(|lang| lang.name.contains(hint))
}

/// Starter content for a new file with the given extension.
pub fn starter_template(ext: &str) -> &'static str {
    match ext {
        "cpp" => CPP_TEMPLATE,
        "c" => {
            "#include <stdio.h>\n\nint main() {\n    // Your code here\n    printf(\"Hello, World!\\n\");\n    \n    return 0;\n}"
        }
        "py" => {
            "# Your Python code here\n\ndef main():\n    print(\"Hello, World!\")\n\nif __name__ == \"__main__\":\n    main()"
        }
        "java" => {
            "public class Main {\n    public static void main(String[] args) {\n        // Your code here\n        System.out.println(\"Hello, World!\");\n    }\n}"
        }
        "js" => {
            "// Your JavaScript code here\n\nfunction main() {\n    console.log(\"Hello, World!\");\n}\n\nmain();"
        }
        _ => "",
    }
}

pub const CPP_TEMPLATE: &str = "#include <bits/stdc++.h>\n\nusing namespace std;\n\nint main() {\n    // Your code here\n    cout << \"Hello, World!\" << endl;\n    \n    return 0;\n}";

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
