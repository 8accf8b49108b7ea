// src/macros.rs

/// `String` shorthand: `s!()` is empty, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string slices into a fresh `String`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $( s.push_str($rest); )+
        s
    }};
}

/// Build one export row (`Vec<String>`) from anything `Display`.
#[macro_export]
macro_rules! cells {
    ($($cell:expr),* $(,)?) => {
        ::std::vec![ $( ::std::string::ToString::to_string(&$cell) ),* ]
    };
}
