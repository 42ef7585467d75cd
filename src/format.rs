use std::{borrow::Cow, fmt::Display};

/// Text used for absent values in tab delimited output
pub const MISSING: &str = "NA";

/// A value that can be written as one field of a tab delimited line
pub trait TabField {
    fn tab_field(&self) -> Cow<'_, str>;
}

macro_rules! impl_tab_field {
    ($($t:ty),*) => {
        $(
            impl TabField for $t {
                fn tab_field(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_tab_field!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char);

impl TabField for str {
    fn tab_field(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl TabField for String {
    fn tab_field(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: TabField + ?Sized> TabField for &T {
    fn tab_field(&self) -> Cow<'_, str> {
        (**self).tab_field()
    }
}

impl<T: TabField> TabField for Option<T> {
    fn tab_field(&self) -> Cow<'_, str> {
        match self {
            Some(x) => x.tab_field(),
            None => Cow::Borrowed(MISSING),
        }
    }
}

/// Join displayable values with tabs, writing `None` as `NA`
pub fn tabout<I, T>(values: I) -> String
where
    I: IntoIterator<Item = Option<T>>,
    T: Display,
{
    let mut s = String::new();
    for (ix, v) in values.into_iter().enumerate() {
        if ix > 0 {
            s.push('\t')
        }
        match v {
            Some(x) => s.push_str(&x.to_string()),
            None => s.push_str(MISSING),
        }
    }
    s
}

/// Join heterogeneous [`TabField`] values with tabs.
///
/// ```
/// use mqmap_utils::tabout;
///
/// assert_eq!(tabout!("chr1", 10, None::<u32>), "chr1\t10\tNA");
/// ```
#[macro_export]
macro_rules! tabout {
    () => {
        ::std::string::String::new()
    };
    ($($x:expr),+ $(,)?) => {
        [$($crate::format::TabField::tab_field(&$x)),+].join("\t")
    };
}
