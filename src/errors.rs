error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Scope(::syntect::parsing::ParseScopeError);
    }

    errors {
        IllegalStringDelimiter(c: char) {
            description("string delimiter can't be flagged as an illegal string character")
            display("'{}' terminates string literals and can't be flagged as illegal", c)
        }
    }
}
