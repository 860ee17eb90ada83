//! Whole-style renders.

use bibstyle_foundation::{Bibliography, Entry};
use bibstyle_language::{Vm, render};

/// A cut-down `plain.bst`: sorted entries, name lists, emphasis.
const MINI_PLAIN: &str = r#"
ENTRY { author title journal year } { } { label }

INTEGERS { nameptr namesleft numnames }
STRINGS { s t }

FUNCTION { field.or.null }
{ duplicate$ empty$
    { pop$ "" }
    'skip$
  if$
}

FUNCTION { emphasize }
{ duplicate$ empty$
    { pop$ "" }
    { "{\em " swap$ * "}" * }
  if$
}

FUNCTION { format.names }
{ 's :=
  #1 'nameptr :=
  s num.names$ 'numnames :=
  numnames 'namesleft :=
    { namesleft #0 > }
    { s nameptr "{ff~}{vv~}{ll}{, jj}" format.name$ 't :=
      nameptr #1 >
        { namesleft #1 >
            { ", " * t * }
            { numnames #2 >
                { "," * }
                'skip$
              if$
              " and " * t *
            }
          if$
        }
        't
      if$
      nameptr #1 + 'nameptr :=
      namesleft #1 - 'namesleft :=
    }
  while$
}

FUNCTION { format.title } { title "t" change.case$ }

FUNCTION { output.bibitem }
{ newline$
  "\bibitem{" write$
  cite$ write$
  "}" write$
  newline$
}

FUNCTION { article }
{ output.bibitem
  author format.names add.period$ write$ newline$
  format.title add.period$ write$ newline$
  journal field.or.null emphasize ", " * year * add.period$ write$ newline$
}

FUNCTION { book }
{ output.bibitem
  author format.names add.period$ write$ newline$
  title emphasize add.period$ write$ newline$
  year add.period$ write$ newline$
}

FUNCTION { default.type } { book }

FUNCTION { presort }
{ author #1 "{ll}" format.name$ purify$ "l" change.case$
  "    " *
  year *
  'sort.key$ :=
}

FUNCTION { begin.bib } { "\begin{thebibliography}{9}" write$ newline$ }

FUNCTION { end.bib } { newline$ "\end{thebibliography}" write$ newline$ }

READ
ITERATE { presort }
SORT
EXECUTE { begin.bib }
ITERATE { call.type$ }
EXECUTE { end.bib }
"#;

fn library() -> Bibliography {
    Bibliography::new()
        .with_entry(
            Entry::new("Article", "turing36")
                .with_field("author", "Alan Turing and Alonzo Church and Emil Post")
                .with_field("title", "On Computable Numbers")
                .with_field("journal", "Proceedings of the LMS")
                .with_field("year", "1936"),
        )
        .with_entry(
            Entry::new("Book", "lamport86")
                .with_field("author", "Leslie Lamport")
                .with_field("title", "{LaTeX}: A Document Preparation System")
                .with_field("year", "1986"),
        )
        .with_entry(
            Entry::new("Article", "knuth74")
                .with_field("author", "Donald E. Knuth")
                .with_field("title", "Computer Programming as an Art")
                .with_field("journal", "Communications of the ACM")
                .with_field("year", "1974"),
        )
}

const EXPECTED: &str = r"\begin{thebibliography}{9}

\bibitem{knuth74}
Donald~E. Knuth.
Computer programming as an art.
{\em Communications of the ACM}, 1974.

\bibitem{lamport86}
Leslie Lamport.
{\em {LaTeX}: A Document Preparation System}.
1986.

\bibitem{turing36}
Alan Turing, Alonzo Church, and Emil Post.
On computable numbers.
{\em Proceedings of the LMS}, 1936.

\end{thebibliography}
";

#[test]
fn mini_plain_renders_sorted_bibliography() {
    assert_eq!(render(MINI_PLAIN, &library()).unwrap(), EXPECTED);
}

#[test]
fn mini_plain_leaves_stack_empty() {
    let ctx = Vm::from_source(MINI_PLAIN)
        .unwrap()
        .execute(&library())
        .unwrap();
    assert!(ctx.stack().is_empty());
    let keys: Vec<_> = ctx.entries().iter().map(|e| e.citation_key()).collect();
    assert_eq!(keys, vec!["knuth74", "lamport86", "turing36"]);
    assert_eq!(ctx.entries()[0].sort_key(), "knuth    1974");
}

#[test]
fn unknown_types_fall_back_to_default() {
    let bib = Bibliography::new().with_entry(
        Entry::new("misc", "m1")
            .with_field("author", "Ada Lovelace")
            .with_field("title", "Notes")
            .with_field("year", "1843"),
    );
    let out = render(MINI_PLAIN, &bib).unwrap();
    assert!(out.contains("\\bibitem{m1}\nAda Lovelace.\n{\\em Notes}.\n1843.\n"));
}

#[test]
fn empty_bibliography_renders_the_frame() {
    assert_eq!(
        render(MINI_PLAIN, &Bibliography::new()).unwrap(),
        "\\begin{thebibliography}{9}\n\n\\end{thebibliography}\n"
    );
}

#[test]
fn vm_is_reusable_across_bibliographies() {
    let vm = Vm::from_source(MINI_PLAIN).unwrap();
    let full = vm.render(&library()).unwrap();
    let empty = vm.render(&Bibliography::new()).unwrap();
    assert_eq!(full, EXPECTED);
    assert_eq!(vm.render(&library()).unwrap(), full);
    assert!(empty.len() < full.len());
}
