//! Python 3 word lists used by the classifier.

use crate::token::Category;

/// Hard keywords of the Python grammar.
pub fn python_keywords() -> &'static [&'static str] {
    &[
        "False", "None", "True", "and", "as", "assert", "async", "await",
        "break", "class", "continue", "def", "del", "elif", "else", "except",
        "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
        "while", "with", "yield"
    ]
}

/// Names defined in the `builtins` module, in `dir(builtins)` order.
pub fn python_builtins() -> &'static [&'static str] {
    &[
        "ArithmeticError", "AssertionError", "AttributeError", "BaseException",
        "BaseExceptionGroup", "BlockingIOError", "BrokenPipeError",
        "BufferError", "BytesWarning", "ChildProcessError",
        "ConnectionAbortedError", "ConnectionError", "ConnectionRefusedError",
        "ConnectionResetError", "DeprecationWarning", "EOFError", "Ellipsis",
        "EncodingWarning", "EnvironmentError", "Exception", "ExceptionGroup",
        "False", "FileExistsError", "FileNotFoundError", "FloatingPointError",
        "FutureWarning", "GeneratorExit", "IOError", "ImportError",
        "ImportWarning", "IndentationError", "IndexError", "InterruptedError",
        "IsADirectoryError", "KeyError", "KeyboardInterrupt", "LookupError",
        "MemoryError", "ModuleNotFoundError", "NameError", "None",
        "NotADirectoryError", "NotImplemented", "NotImplementedError",
        "OSError", "OverflowError", "PendingDeprecationWarning",
        "PermissionError", "ProcessLookupError", "RecursionError",
        "ReferenceError", "ResourceWarning", "RuntimeError", "RuntimeWarning",
        "StopAsyncIteration", "StopIteration", "SyntaxError", "SyntaxWarning",
        "SystemError", "SystemExit", "TabError", "TimeoutError", "True",
        "TypeError", "UnboundLocalError", "UnicodeDecodeError",
        "UnicodeEncodeError", "UnicodeError", "UnicodeTranslateError",
        "UnicodeWarning", "UserWarning", "ValueError", "Warning",
        "ZeroDivisionError", "__build_class__", "__debug__", "__doc__",
        "__import__", "__loader__", "__name__", "__package__", "__spec__",
        "abs", "aiter", "all", "anext", "any", "ascii", "bin", "bool",
        "breakpoint", "bytearray", "bytes", "callable", "chr", "classmethod",
        "compile", "complex", "copyright", "credits", "delattr", "dict", "dir",
        "divmod", "enumerate", "eval", "exec", "exit", "filter", "float",
        "format", "frozenset", "getattr", "globals", "hasattr", "hash", "help",
        "hex", "id", "input", "int", "isinstance", "issubclass", "iter", "len",
        "license", "list", "locals", "map", "max", "memoryview", "min", "next",
        "object", "oct", "open", "ord", "pow", "print", "property", "quit",
        "range", "repr", "reversed", "round", "set", "setattr", "slice",
        "sorted", "staticmethod", "str", "sum", "super", "tuple", "type",
        "vars", "zip"
    ]
}

/// Conventional name of the instance parameter of a method.
pub const SELF_NAME: &str = "self";

/// Keywords whose following name is being defined, with the category of
/// that name.
pub const DEFINITION_KEYWORDS: [(&str, Category); 3] = [
    ("def", Category::FunctionName),
    ("class", Category::ClassName),
    ("import", Category::ImportName),
];

/// Category of a name that follows `keyword`, if it is a definition.
pub fn defined_category(keyword: &str) -> Option<Category> {
    DEFINITION_KEYWORDS
        .iter()
        .find(|(word, _)| *word == keyword)
        .map(|&(_, category)| category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_lists() {
        let keywords = python_keywords();
        assert!(keywords.contains(&"def"));
        assert!(keywords.contains(&"None"));
        assert!(!keywords.contains(&"print"));

        let builtins = python_builtins();
        assert!(builtins.contains(&"print"));
        assert!(builtins.contains(&"ValueError"));
        assert!(builtins.contains(&"__import__"));
        assert!(!builtins.contains(&"self"));
    }

    #[test]
    fn test_definition_keywords_are_keywords() {
        for (word, _) in DEFINITION_KEYWORDS {
            assert!(python_keywords().contains(&word));
        }
        assert_eq!(defined_category("class"), Some(Category::ClassName));
        assert_eq!(defined_category("lambda"), None);
    }
}
