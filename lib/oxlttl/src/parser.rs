//! Recursive descent parsers turning token lists into [`ParseNode`] trees.

use crate::lexer::{LexerMode, TokenWithPosition, TurtleToken, tokenize};
use oxlmodel::{Diagnostic, LoaderError, MAX_NESTING_DEPTH, ParseNode, TextPosition};

/// The syntaxes of the Turtle family.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Syntax {
    NTriples,
    NQuads,
    Turtle,
    TriG,
    Rdft,
}

impl Syntax {
    fn lexer_mode(self) -> LexerMode {
        match self {
            Self::NTriples | Self::NQuads => LexerMode::Line,
            Self::Turtle | Self::TriG => LexerMode::Turtle,
            Self::Rdft => LexerMode::Rule,
        }
    }
}

/// The node kinds of the Turtle family parse trees.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum TurtleSymbol {
    Document,
    /// `value` is the prefix name, the child is the namespace IRI.
    PrefixDirective,
    /// The child is the base IRI.
    BaseDirective,
    /// A subject followed by [`TurtleSymbol::PredicateObjects`] children.
    Triples,
    /// A verb followed by its objects.
    PredicateObjects,
    /// A graph block: an optional label followed by [`TurtleSymbol::Triples`] children.
    Graph,
    /// A rule: name, optional [`TurtleSymbol::Distinct`], antecedents and consequents.
    Rule,
    Distinct,
    Antecedents,
    Consequents,
    /// Some [`TurtleSymbol::Marker`] children followed by [`TurtleSymbol::Triples`] children.
    Conjunct,
    /// `not` or `meta`, lower-cased in `value`.
    Marker,
    Iri,
    /// `value` is `prefix:local`.
    PrefixedName,
    /// The `a` keyword.
    A,
    BlankNodeLabel,
    /// `[ ... ]`, its children are [`TurtleSymbol::PredicateObjects`].
    Anonymous,
    Collection,
    /// `value` is the lexical form, the optional child is a [`TurtleSymbol::LangTag`] or a datatype IRI.
    Literal,
    LangTag,
    Integer,
    Decimal,
    Double,
    Boolean,
    Variable,
}

pub type TurtleNode = ParseNode<TurtleSymbol>;

/// Parses a whole document.
///
/// Parsing goes on after an error to report as many errors as possible.
pub fn parse(input: &str, syntax: Syntax) -> Result<TurtleNode, Vec<Diagnostic>> {
    let tokens = tokenize(input, syntax.lexer_mode())?;
    let mut parser = TurtleParser {
        input,
        line_starts: std::iter::once(0)
            .chain(memchr::memchr_iter(b'\n', input.as_bytes()).map(|i| i + 1))
            .collect(),
        tokens,
        cursor: 0,
        depth: 0,
        syntax,
        errors: Vec::new(),
    };
    let document = parser.parse_document();
    if parser.errors.is_empty() {
        Ok(document)
    } else {
        Err(parser.errors)
    }
}

type ParseResult<T> = Result<T, Diagnostic>;

struct TurtleParser<'a> {
    input: &'a str,
    line_starts: Vec<usize>,
    tokens: Vec<TokenWithPosition<TurtleToken<'a>>>,
    cursor: usize,
    /// Number of open blank node property lists and collections.
    depth: usize,
    syntax: Syntax,
    errors: Vec<Diagnostic>,
}

impl<'a> TurtleParser<'a> {
    fn parse_document(&mut self) -> TurtleNode {
        let mut document = TurtleNode::new(TurtleSymbol::Document, TextPosition::default());
        while self.peek().is_some() {
            let statement = match self.syntax {
                Syntax::NTriples | Syntax::NQuads => self.parse_line_statement(),
                Syntax::Turtle => self.parse_turtle_statement(),
                Syntax::TriG => self.parse_trig_block(),
                Syntax::Rdft => self.parse_rule_statement(),
            };
            match statement {
                Ok(statement) => document.push(statement),
                Err(error) => {
                    self.errors.push(error);
                    self.depth = 0;
                    self.recover();
                    if self.is_punctuation("}") {
                        self.cursor += 1;
                    }
                }
            }
        }
        document
    }

    // [2]  triples  ::=  subject predicate object '.'
    // [2]  statement  ::=  subject predicate object graphLabel? '.'
    fn parse_line_statement(&mut self) -> ParseResult<TurtleNode> {
        let start = self.current_position();
        let subject = self.parse_line_term(false, "subject")?;
        let predicate = match self.next_token("predicate")? {
            (TurtleToken::IriRef(iri), position) => {
                TurtleNode::leaf(TurtleSymbol::Iri, iri, position)
            }
            (token, position) => {
                return Err(self.unexpected(&token, position, "an IRI as predicate"));
            }
        };
        let object = self.parse_line_term(true, "object")?;
        let triples = TurtleNode::new(TurtleSymbol::Triples, start)
            .with_child(subject)
            .with_child(
                TurtleNode::new(TurtleSymbol::PredicateObjects, predicate.position)
                    .with_child(predicate)
                    .with_child(object),
            );
        let statement = if self.syntax == Syntax::NQuads && !self.is_punctuation(".") {
            let label = self.parse_line_term(false, "graph label")?;
            TurtleNode::new(TurtleSymbol::Graph, start)
                .with_child(label)
                .with_child(triples)
        } else {
            triples
        };
        self.expect_punctuation(".")?;
        Ok(statement)
    }

    fn parse_line_term(&mut self, allow_literal: bool, role: &str) -> ParseResult<TurtleNode> {
        match self.next_token(role)? {
            (TurtleToken::IriRef(iri), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::Iri, iri, position))
            }
            (TurtleToken::BlankNodeLabel(label), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::BlankNodeLabel, label, position))
            }
            (TurtleToken::String(value), position) if allow_literal => {
                self.parse_literal_suffix(value, position)
            }
            (token, position) => Err(self.unexpected(
                &token,
                position,
                &format!("an IRI{} or a blank node as {role}", if allow_literal { ", a literal" } else { "" }),
            )),
        }
    }

    fn parse_turtle_statement(&mut self) -> ParseResult<TurtleNode> {
        if let Some(directive) = self.parse_directive()? {
            return Ok(directive);
        }
        let triples = self.parse_triples()?;
        self.expect_punctuation(".")?;
        Ok(triples)
    }

    // [3]  directive     ::=  prefixID | base | sparqlPrefix | sparqlBase
    // [4]  prefixID      ::=  '@prefix' PNAME_NS IRIREF '.'
    // [5]  base          ::=  '@base' IRIREF '.'
    // [5s] sparqlBase    ::=  "BASE" IRIREF
    // [6s] sparqlPrefix  ::=  "PREFIX" PNAME_NS IRIREF
    fn parse_directive(&mut self) -> ParseResult<Option<TurtleNode>> {
        let (is_prefix, needs_dot) = match self.peek() {
            Some(TurtleToken::LangTag("prefix")) => (true, true),
            Some(TurtleToken::LangTag("base")) => (false, true),
            Some(TurtleToken::PlainKeyword(k)) if k.eq_ignore_ascii_case("prefix") => {
                (true, false)
            }
            Some(TurtleToken::PlainKeyword(k)) if k.eq_ignore_ascii_case("base") => {
                (false, false)
            }
            _ => return Ok(None),
        };
        let start = self.current_position();
        self.cursor += 1;
        let directive = if is_prefix {
            let prefix = match self.next_token("prefix name")? {
                (TurtleToken::PrefixedName { prefix, local }, _) if local.is_empty() => prefix,
                (token, position) => {
                    return Err(self.unexpected(&token, position, "a prefix name like 'ex:'"));
                }
            };
            let iri = self.parse_iri_ref("prefix IRI")?;
            TurtleNode::leaf(TurtleSymbol::PrefixDirective, prefix, start).with_child(iri)
        } else {
            let iri = self.parse_iri_ref("base IRI")?;
            TurtleNode::new(TurtleSymbol::BaseDirective, start).with_child(iri)
        };
        if needs_dot {
            self.expect_punctuation(".")?;
        }
        Ok(Some(directive))
    }

    fn parse_iri_ref(&mut self, role: &str) -> ParseResult<TurtleNode> {
        match self.next_token(role)? {
            (TurtleToken::IriRef(iri), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::Iri, iri, position))
            }
            (token, position) => Err(self.unexpected(&token, position, "an IRI between < and >")),
        }
    }

    // [6]  triples  ::=  subject predicateObjectList | blankNodePropertyList predicateObjectList?
    fn parse_triples(&mut self) -> ParseResult<TurtleNode> {
        let start = self.current_position();
        let subject = self.parse_subject()?;
        self.parse_triples_after_subject(subject, start)
    }

    fn parse_triples_after_subject(
        &mut self,
        subject: TurtleNode,
        start: TextPosition,
    ) -> ParseResult<TurtleNode> {
        let optional = subject.symbol == TurtleSymbol::Anonymous && !subject.children.is_empty();
        let mut triples = TurtleNode::new(TurtleSymbol::Triples, start).with_child(subject);
        if !(optional && (self.is_punctuation(".") || self.is_punctuation("}"))) {
            for predicate_objects in self.parse_predicate_object_list()? {
                triples.push(predicate_objects);
            }
        }
        Ok(triples)
    }

    // [10]  subject  ::=  iri | BlankNode | collection
    fn parse_subject(&mut self) -> ParseResult<TurtleNode> {
        match self.peek() {
            Some(TurtleToken::Punctuation("[")) => self.parse_blank_node_property_list(),
            Some(TurtleToken::Punctuation("(")) => self.parse_collection(),
            _ => match self.next_token("subject")? {
                (TurtleToken::IriRef(iri), position) => {
                    Ok(TurtleNode::leaf(TurtleSymbol::Iri, iri, position))
                }
                (TurtleToken::PrefixedName { prefix, local }, position) => Ok(TurtleNode::leaf(
                    TurtleSymbol::PrefixedName,
                    format!("{prefix}:{local}"),
                    position,
                )),
                (TurtleToken::BlankNodeLabel(label), position) => {
                    Ok(TurtleNode::leaf(TurtleSymbol::BlankNodeLabel, label, position))
                }
                (token, position) => {
                    Err(self.unexpected(&token, position, "an IRI or a blank node as subject"))
                }
            },
        }
    }

    // [7]  predicateObjectList  ::=  verb objectList (';' (verb objectList)?)*
    fn parse_predicate_object_list(&mut self) -> ParseResult<Vec<TurtleNode>> {
        let mut list = vec![self.parse_predicate_objects()?];
        while self.is_punctuation(";") {
            while self.is_punctuation(";") {
                self.cursor += 1;
            }
            if self.is_punctuation(".") || self.is_punctuation("]") || self.is_punctuation("}") {
                break;
            }
            list.push(self.parse_predicate_objects()?);
        }
        Ok(list)
    }

    // [8]  objectList  ::=  object (',' object)*
    // [9]  verb        ::=  predicate | 'a'
    fn parse_predicate_objects(&mut self) -> ParseResult<TurtleNode> {
        let verb = self.parse_verb()?;
        let mut predicate_objects =
            TurtleNode::new(TurtleSymbol::PredicateObjects, verb.position).with_child(verb);
        predicate_objects.push(self.parse_object()?);
        while self.is_punctuation(",") {
            self.cursor += 1;
            predicate_objects.push(self.parse_object()?);
        }
        Ok(predicate_objects)
    }

    fn parse_verb(&mut self) -> ParseResult<TurtleNode> {
        match self.next_token("predicate")? {
            (TurtleToken::PlainKeyword("a"), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::A, "a", position))
            }
            (TurtleToken::IriRef(iri), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::Iri, iri, position))
            }
            (TurtleToken::PrefixedName { prefix, local }, position) => Ok(TurtleNode::leaf(
                TurtleSymbol::PrefixedName,
                format!("{prefix}:{local}"),
                position,
            )),
            (TurtleToken::Variable(name), position) if self.syntax == Syntax::Rdft => {
                Ok(TurtleNode::leaf(TurtleSymbol::Variable, name, position))
            }
            (token, position) => Err(self.unexpected(&token, position, "an IRI or 'a' as predicate")),
        }
    }

    // [12]  object  ::=  iri | BlankNode | collection | blankNodePropertyList | literal
    fn parse_object(&mut self) -> ParseResult<TurtleNode> {
        match self.peek() {
            Some(TurtleToken::Punctuation("[")) => self.parse_blank_node_property_list(),
            Some(TurtleToken::Punctuation("(")) => self.parse_collection(),
            _ => self.parse_simple_term("object"),
        }
    }

    // [13]  literal  ::=  RDFLiteral | NumericLiteral | BooleanLiteral
    fn parse_simple_term(&mut self, role: &str) -> ParseResult<TurtleNode> {
        match self.next_token(role)? {
            (TurtleToken::IriRef(iri), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::Iri, iri, position))
            }
            (TurtleToken::PrefixedName { prefix, local }, position) => Ok(TurtleNode::leaf(
                TurtleSymbol::PrefixedName,
                format!("{prefix}:{local}"),
                position,
            )),
            (TurtleToken::BlankNodeLabel(label), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::BlankNodeLabel, label, position))
            }
            (TurtleToken::String(value) | TurtleToken::LongString(value), position) => {
                self.parse_literal_suffix(value, position)
            }
            (TurtleToken::Integer(value), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::Integer, value, position))
            }
            (TurtleToken::Decimal(value), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::Decimal, value, position))
            }
            (TurtleToken::Double(value), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::Double, value, position))
            }
            (TurtleToken::PlainKeyword(value @ ("true" | "false")), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::Boolean, value, position))
            }
            (TurtleToken::Variable(name), position) if self.syntax == Syntax::Rdft => {
                Ok(TurtleNode::leaf(TurtleSymbol::Variable, name, position))
            }
            (token, position) => Err(self.unexpected(
                &token,
                position,
                &format!("an IRI, a blank node or a literal as {role}"),
            )),
        }
    }

    // [128s]  RDFLiteral  ::=  String (LANGTAG | '^^' iri)?
    fn parse_literal_suffix(
        &mut self,
        value: String,
        position: TextPosition,
    ) -> ParseResult<TurtleNode> {
        let mut literal = TurtleNode::leaf(TurtleSymbol::Literal, value, position);
        match self.peek() {
            Some(TurtleToken::LangTag(_)) => {
                if let (TurtleToken::LangTag(language), position) = self.next_token("language")? {
                    literal.push(TurtleNode::leaf(TurtleSymbol::LangTag, language, position));
                }
            }
            Some(TurtleToken::Punctuation("^^")) => {
                self.cursor += 1;
                let datatype = match self.next_token("datatype")? {
                    (TurtleToken::IriRef(iri), position) => {
                        TurtleNode::leaf(TurtleSymbol::Iri, iri, position)
                    }
                    (TurtleToken::PrefixedName { prefix, local }, position)
                        if !matches!(self.syntax, Syntax::NTriples | Syntax::NQuads) =>
                    {
                        TurtleNode::leaf(
                            TurtleSymbol::PrefixedName,
                            format!("{prefix}:{local}"),
                            position,
                        )
                    }
                    (token, position) => {
                        return Err(self.unexpected(&token, position, "a datatype IRI"));
                    }
                };
                literal.push(datatype);
            }
            _ => (),
        }
        Ok(literal)
    }

    // [14]  blankNodePropertyList  ::=  '[' predicateObjectList ']'
    // [162s] ANON  ::=  '[' WS* ']'
    fn parse_blank_node_property_list(&mut self) -> ParseResult<TurtleNode> {
        let position = self.current_position();
        self.expect_punctuation("[")?;
        let mut node = TurtleNode::new(TurtleSymbol::Anonymous, position);
        if !self.is_punctuation("]") {
            let predicate_objects = self.nested(position, "blank node property lists", |p| {
                p.parse_predicate_object_list()
            })?;
            for predicate_objects in predicate_objects {
                node.push(predicate_objects);
            }
        }
        self.expect_punctuation("]")?;
        Ok(node)
    }

    // [15]  collection  ::=  '(' object* ')'
    fn parse_collection(&mut self) -> ParseResult<TurtleNode> {
        let position = self.current_position();
        self.expect_punctuation("(")?;
        let mut collection = TurtleNode::new(TurtleSymbol::Collection, position);
        self.nested(position, "collections", |p| {
            while !p.is_punctuation(")") {
                collection.push(p.parse_object()?);
            }
            Ok(())
        })?;
        self.cursor += 1;
        Ok(collection)
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        position: TextPosition,
        kind: &str,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            let offset = position.byte_offset();
            return Err(Diagnostic::new(LoaderError::too_deep(kind))
                .in_source(self.input, offset..offset));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // [1g]  trigDoc  ::=  (directive | block)*
    // [2g]  block    ::=  triplesOrGraph | wrappedGraph | triples2 | "GRAPH" labelOrSubject wrappedGraph
    fn parse_trig_block(&mut self) -> ParseResult<TurtleNode> {
        if let Some(directive) = self.parse_directive()? {
            return Ok(directive);
        }
        let start = self.current_position();
        match self.peek() {
            Some(TurtleToken::Punctuation("{")) => {
                self.parse_wrapped_graph(TurtleNode::new(TurtleSymbol::Graph, start))
            }
            Some(TurtleToken::PlainKeyword(k)) if k.eq_ignore_ascii_case("graph") => {
                self.cursor += 1;
                let label = self.parse_graph_label()?;
                self.parse_wrapped_graph(
                    TurtleNode::new(TurtleSymbol::Graph, start).with_child(label),
                )
            }
            _ => {
                // [3g]  triplesOrGraph  ::=  labelOrSubject (wrappedGraph | predicateObjectList '.')
                // [4g]  triples2        ::=  blankNodePropertyList predicateObjectList? '.' | collection predicateObjectList '.'
                let subject = self.parse_subject()?;
                let is_label = matches!(
                    subject.symbol,
                    TurtleSymbol::Iri | TurtleSymbol::PrefixedName | TurtleSymbol::BlankNodeLabel
                ) || (subject.symbol == TurtleSymbol::Anonymous
                    && subject.children.is_empty());
                if is_label && self.is_punctuation("{") {
                    return self.parse_wrapped_graph(
                        TurtleNode::new(TurtleSymbol::Graph, start).with_child(subject),
                    );
                }
                let triples = self.parse_triples_after_subject(subject, start)?;
                self.expect_punctuation(".")?;
                Ok(triples)
            }
        }
    }

    // [7g]  labelOrSubject  ::=  iri | BlankNode
    fn parse_graph_label(&mut self) -> ParseResult<TurtleNode> {
        if self.is_punctuation("[") {
            let position = self.current_position();
            self.cursor += 1;
            self.expect_punctuation("]")?;
            return Ok(TurtleNode::new(TurtleSymbol::Anonymous, position));
        }
        match self.next_token("graph label")? {
            (TurtleToken::IriRef(iri), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::Iri, iri, position))
            }
            (TurtleToken::PrefixedName { prefix, local }, position) => Ok(TurtleNode::leaf(
                TurtleSymbol::PrefixedName,
                format!("{prefix}:{local}"),
                position,
            )),
            (TurtleToken::BlankNodeLabel(label), position) => {
                Ok(TurtleNode::leaf(TurtleSymbol::BlankNodeLabel, label, position))
            }
            (token, position) => {
                Err(self.unexpected(&token, position, "an IRI or a blank node as graph label"))
            }
        }
    }

    // [5g]  wrappedGraph  ::=  '{' triplesBlock? '}'
    // [6g]  triplesBlock  ::=  triples ('.' triplesBlock?)?
    fn parse_wrapped_graph(&mut self, mut graph: TurtleNode) -> ParseResult<TurtleNode> {
        self.expect_punctuation("{")?;
        while !self.is_punctuation("}") {
            graph.push(self.parse_triples()?);
            if self.is_punctuation(".") {
                self.cursor += 1;
            } else if !self.is_punctuation("}") {
                let (token, position) = self.next_token("'.' or '}'")?;
                return Err(self.unexpected(&token, position, "'.' or '}'"));
            }
        }
        self.cursor += 1;
        Ok(graph)
    }

    // rule  ::=  'rule' name 'distinct'? '{' conjunct* '}' '=>' '{' conjunct* '}'
    fn parse_rule_statement(&mut self) -> ParseResult<TurtleNode> {
        if let Some(directive) = self.parse_directive()? {
            return Ok(directive);
        }
        let start = self.current_position();
        match self.next_token("rule")? {
            (TurtleToken::PlainKeyword(k), _) if k.eq_ignore_ascii_case("rule") => (),
            (token, position) => return Err(self.unexpected(&token, position, "'rule'")),
        }
        let name = match self.next_token("rule name")? {
            (TurtleToken::IriRef(iri), position) => {
                TurtleNode::leaf(TurtleSymbol::Iri, iri, position)
            }
            (TurtleToken::PrefixedName { prefix, local }, position) => TurtleNode::leaf(
                TurtleSymbol::PrefixedName,
                format!("{prefix}:{local}"),
                position,
            ),
            (token, position) => {
                return Err(self.unexpected(&token, position, "an IRI as rule name"));
            }
        };
        let mut rule = TurtleNode::new(TurtleSymbol::Rule, start).with_child(name);
        if matches!(self.peek(), Some(TurtleToken::PlainKeyword(k)) if k.eq_ignore_ascii_case("distinct"))
        {
            rule.push(TurtleNode::new(
                TurtleSymbol::Distinct,
                self.current_position(),
            ));
            self.cursor += 1;
        }
        rule.push(self.parse_conjuncts(TurtleSymbol::Antecedents)?);
        self.expect_punctuation("=>")?;
        rule.push(self.parse_conjuncts(TurtleSymbol::Consequents)?);
        Ok(rule)
    }

    fn parse_conjuncts(&mut self, symbol: TurtleSymbol) -> ParseResult<TurtleNode> {
        let mut conjuncts = TurtleNode::new(symbol, self.current_position());
        self.expect_punctuation("{")?;
        while !self.is_punctuation("}") {
            conjuncts.push(self.parse_conjunct()?);
        }
        self.cursor += 1;
        Ok(conjuncts)
    }

    // conjunct  ::=  marker* ('{' triple ('.' triple)* '.'? '}' | triple '.'?)
    // marker    ::=  'not' | 'meta'
    fn parse_conjunct(&mut self) -> ParseResult<TurtleNode> {
        let mut conjunct = TurtleNode::new(TurtleSymbol::Conjunct, self.current_position());
        while let Some(TurtleToken::PlainKeyword(k)) = self.peek() {
            let marker = k.to_ascii_lowercase();
            if marker != "not" && marker != "meta" {
                break;
            }
            conjunct.push(TurtleNode::leaf(
                TurtleSymbol::Marker,
                marker,
                self.current_position(),
            ));
            self.cursor += 1;
        }
        if self.is_punctuation("{") {
            self.cursor += 1;
            loop {
                conjunct.push(self.parse_rule_triple()?);
                if self.is_punctuation(".") {
                    self.cursor += 1;
                }
                if self.is_punctuation("}") {
                    self.cursor += 1;
                    break;
                }
            }
        } else {
            conjunct.push(self.parse_rule_triple()?);
            if self.is_punctuation(".") {
                self.cursor += 1;
            }
        }
        Ok(conjunct)
    }

    // triple  ::=  term term term
    fn parse_rule_triple(&mut self) -> ParseResult<TurtleNode> {
        let start = self.current_position();
        let subject = self.parse_rule_term("subject")?;
        let verb = self.parse_verb()?;
        let object = self.parse_rule_term("object")?;
        Ok(TurtleNode::new(TurtleSymbol::Triples, start)
            .with_child(subject)
            .with_child(
                TurtleNode::new(TurtleSymbol::PredicateObjects, verb.position)
                    .with_child(verb)
                    .with_child(object),
            ))
    }

    fn parse_rule_term(&mut self, role: &str) -> ParseResult<TurtleNode> {
        if self.is_punctuation("[") {
            let position = self.current_position();
            self.cursor += 1;
            self.expect_punctuation("]")?;
            return Ok(TurtleNode::new(TurtleSymbol::Anonymous, position));
        }
        self.parse_simple_term(role)
    }

    /// Skips the tokens of a statement that failed to parse.
    fn recover(&mut self) {
        if self.syntax != Syntax::Rdft
            && self.cursor > 0
            && matches!(
                self.tokens.get(self.cursor - 1).map(|t| &t.token),
                Some(TurtleToken::Punctuation("."))
            )
        {
            return;
        }
        let mut depth = 0_usize;
        while let Some(token) = self.peek() {
            match token {
                TurtleToken::Punctuation("{" | "[" | "(") => depth += 1,
                TurtleToken::Punctuation("}" | "]" | ")") if depth > 0 => depth -= 1,
                TurtleToken::Punctuation("}") => return,
                TurtleToken::Punctuation(".") if depth == 0 && self.syntax != Syntax::Rdft => {
                    self.cursor += 1;
                    return;
                }
                TurtleToken::PlainKeyword(k)
                    if self.syntax == Syntax::Rdft && k.eq_ignore_ascii_case("rule") =>
                {
                    return;
                }
                _ => (),
            }
            self.cursor += 1;
        }
    }

    fn peek(&self) -> Option<&TurtleToken<'a>> {
        self.tokens.get(self.cursor).map(|t| &t.token)
    }

    fn is_punctuation(&self, punctuation: &str) -> bool {
        matches!(self.peek(), Some(TurtleToken::Punctuation(p)) if *p == punctuation)
    }

    fn next_token(&mut self, expected: &str) -> ParseResult<(TurtleToken<'a>, TextPosition)> {
        let Some(token) = self.tokens.get(self.cursor) else {
            return Err(Diagnostic::new(LoaderError::syntax(format!(
                "Unexpected end of file, expecting {expected}"
            )))
            .in_source(self.input, self.input.len()..self.input.len()));
        };
        let token = token.clone();
        self.cursor += 1;
        Ok((token.token, self.position(token.position.start)))
    }

    fn expect_punctuation(&mut self, punctuation: &str) -> ParseResult<()> {
        if self.is_punctuation(punctuation) {
            self.cursor += 1;
            return Ok(());
        }
        let (token, position) = self.next_token(&format!("'{punctuation}'"))?;
        Err(self.unexpected(&token, position, &format!("'{punctuation}'")))
    }

    fn unexpected(&self, token: &TurtleToken<'_>, position: TextPosition, expected: &str) -> Diagnostic {
        let offset = position.byte_offset();
        Diagnostic::new(LoaderError::syntax(format!(
            "Unexpected {}, expecting {expected}",
            describe(token)
        )))
        .in_source(self.input, offset..offset)
    }

    fn current_position(&self) -> TextPosition {
        self.tokens
            .get(self.cursor)
            .map_or_else(|| self.position(self.input.len()), |t| self.position(t.position.start))
    }

    fn position(&self, offset: usize) -> TextPosition {
        let line = self.line_starts.partition_point(|start| *start <= offset) - 1;
        let line_start = self.line_starts[line];
        TextPosition {
            line: to_u64(line),
            column: to_u64(
                self.input
                    .get(line_start..offset)
                    .map_or(0, |s| s.chars().count()),
            ),
            offset: to_u64(offset),
        }
    }
}

fn to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn describe(token: &TurtleToken<'_>) -> String {
    match token {
        TurtleToken::IriRef(iri) => format!("IRI <{iri}>"),
        TurtleToken::PrefixedName { prefix, local } => format!("prefixed name {prefix}:{local}"),
        TurtleToken::Variable(name) => format!("variable ?{name}"),
        TurtleToken::BlankNodeLabel(label) => format!("blank node _:{label}"),
        TurtleToken::String(_) | TurtleToken::LongString(_) => "string".into(),
        TurtleToken::Integer(v) | TurtleToken::Decimal(v) | TurtleToken::Double(v) => {
            format!("number {v}")
        }
        TurtleToken::LangTag(tag) => format!("'@{tag}'"),
        TurtleToken::Punctuation(p) => format!("'{p}'"),
        TurtleToken::PlainKeyword(k) => format!("'{k}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turtle_tree() {
        let document = parse(
            "@prefix ex: <http://ex.com/> .\nex:s ex:p ( 1 \"a\"@en ) ; a [ ex:q true ] .",
            Syntax::Turtle,
        )
        .unwrap();
        assert_eq!(document.children.len(), 2);
        let prefix = &document.children[0];
        assert_eq!(prefix.symbol, TurtleSymbol::PrefixDirective);
        assert_eq!(prefix.value(), "ex");
        let triples = &document.children[1];
        assert_eq!(triples.symbol, TurtleSymbol::Triples);
        assert_eq!(triples.children.len(), 3);
        assert_eq!(triples.children[0].value(), "ex:s");
        assert_eq!(triples.position.line, 1);
        let collection = &triples.children[1].children[1];
        assert_eq!(collection.symbol, TurtleSymbol::Collection);
        assert_eq!(collection.children[1].children[0].value(), "en");
        assert_eq!(triples.children[2].children[1].symbol, TurtleSymbol::Anonymous);
    }

    #[test]
    fn trig_blocks() {
        let document = parse(
            "{ <s> <p> <o> } <g> { <s> <p> <o> . <s> <p> <o2> } GRAPH [] { } <s> <p> <o> .",
            Syntax::TriG,
        )
        .unwrap();
        let symbols = document
            .children
            .iter()
            .map(|c| (c.symbol, c.children.len()))
            .collect::<Vec<_>>();
        assert_eq!(
            symbols,
            [
                (TurtleSymbol::Graph, 1),
                (TurtleSymbol::Graph, 3),
                (TurtleSymbol::Graph, 1),
                (TurtleSymbol::Triples, 2),
            ]
        );
    }

    #[test]
    fn nquads_graph_label() {
        let document = parse("<s> <p> \"o\" <g> .\n_:s <p> _:o .\n", Syntax::NQuads).unwrap();
        assert_eq!(document.children[0].symbol, TurtleSymbol::Graph);
        assert_eq!(document.children[1].symbol, TurtleSymbol::Triples);
    }

    #[test]
    fn ntriples_refuses_prefixed_names() {
        assert!(parse("<s> <p> \"o\"^^<http://ex.com/dt> .", Syntax::NTriples).is_ok());
        assert!(parse("<s> <p> ex:o .", Syntax::NTriples).is_err());
    }

    #[test]
    fn rule_tree() {
        let document = parse(
            "RULE <r> DISTINCT { ?x a ?y . NOT META { ?x <p> [] } } => { ?x a <c> }",
            Syntax::Rdft,
        )
        .unwrap();
        let rule = &document.children[0];
        assert_eq!(rule.symbol, TurtleSymbol::Rule);
        assert_eq!(rule.children[1].symbol, TurtleSymbol::Distinct);
        let antecedents = &rule.children[2];
        assert_eq!(antecedents.children.len(), 2);
        let negated = &antecedents.children[1];
        assert_eq!(
            negated
                .children_with(&TurtleSymbol::Marker)
                .map(ParseNode::value)
                .collect::<Vec<_>>(),
            ["not", "meta"]
        );
    }

    #[test]
    fn nesting_is_bounded() {
        let collections = format!("<s> <p> {}1{} .", "( ".repeat(1000), " )".repeat(1000));
        let errors = parse(&collections, Syntax::Turtle).unwrap_err();
        assert!(
            matches!(errors[0].error(), LoaderError::Syntax(m) if m.starts_with("Too many nested collections"))
        );
        let lists = format!("<s> <p> {}<o>{} .", "[ <p> ".repeat(1000), " ]".repeat(1000));
        assert!(parse(&lists, Syntax::TriG).is_err());
        let nested = format!(
            "<s> <p> {}1{} .\n<s> <p> {}<o>{} .",
            "( ".repeat(100),
            " )".repeat(100),
            "[ <p> ".repeat(100),
            " ]".repeat(100)
        );
        assert!(parse(&nested, Syntax::Turtle).is_ok());
    }

    #[test]
    fn errors_are_collected() {
        let errors = parse("<s> <p> .\n<s> <p> <o> .\n<s> .\n", Syntax::Turtle).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].location().unwrap().start.line, 2);
    }
}
