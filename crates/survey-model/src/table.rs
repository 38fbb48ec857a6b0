#![deny(unsafe_code)]

use serde::Serialize;

/// The five output relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TableKind {
    Surveys,
    Questions,
    SurveysQuestions,
    Respondents,
    QuestionResponses,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Surveys,
        TableKind::Questions,
        TableKind::SurveysQuestions,
        TableKind::Respondents,
        TableKind::QuestionResponses,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TableKind::Surveys => "Surveys",
            TableKind::Questions => "Questions",
            TableKind::SurveysQuestions => "SurveysQuestions",
            TableKind::Respondents => "Respondents",
            TableKind::QuestionResponses => "QuestionResponses",
        }
    }

    /// Fixed header labels, in column order.
    pub fn header(self) -> &'static [&'static str] {
        match self {
            TableKind::Surveys => &["SurveyID", "Filename"],
            TableKind::Questions => &["QuestionID", "QuestionText"],
            TableKind::SurveysQuestions => &["SurveyID", "QuestionID", "QuestionOrder"],
            TableKind::Respondents => &[
                "SurveyID",
                "RespondentID",
                "CollectorID",
                "StartDate",
                "EndDate",
                "IPAddress",
                "EmailAddress",
                "FirstName",
                "LastName",
                "CustomData",
            ],
            TableKind::QuestionResponses => &["QuestionID", "RespondentID", "Response"],
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.tab", self.name())
    }
}

/// A finished relation: fixed header plus text rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub kind: TableKind,
    pub rows: Vec<Vec<String>>,
}

impl Relation {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        self.kind.header()
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All five relations, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputTables {
    pub surveys: Relation,
    pub questions: Relation,
    pub surveys_questions: Relation,
    pub respondents: Relation,
    pub question_responses: Relation,
}

impl Default for OutputTables {
    fn default() -> Self {
        Self {
            surveys: Relation::new(TableKind::Surveys),
            questions: Relation::new(TableKind::Questions),
            surveys_questions: Relation::new(TableKind::SurveysQuestions),
            respondents: Relation::new(TableKind::Respondents),
            question_responses: Relation::new(TableKind::QuestionResponses),
        }
    }
}

impl OutputTables {
    pub fn get(&self, kind: TableKind) -> &Relation {
        match kind {
            TableKind::Surveys => &self.surveys,
            TableKind::Questions => &self.questions,
            TableKind::SurveysQuestions => &self.surveys_questions,
            TableKind::Respondents => &self.respondents,
            TableKind::QuestionResponses => &self.question_responses,
        }
    }

    /// Relations in the fixed output order.
    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        TableKind::ALL.into_iter().map(|kind| self.get(kind))
    }
}
