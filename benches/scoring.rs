use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examgrade::engine::{grade_sheet, GradingConfig};
use examgrade::lexical::keyword_match;
use examgrade::model::{AnswerKey, FreeTextKey, Question, Submission};
use examgrade::scale::GradingScale;
use examgrade::similarity::cosine_similarity;

fn make_sheet(question_count: u32) -> (Vec<Question>, Submission) {
    let mut questions = Vec::new();
    let mut submission = Submission::new();
    for n in 1..=question_count {
        let id = format!("q{n}");
        questions.push(Question {
            id: id.clone(),
            number: n,
            text: String::new(),
            marks: 10,
            answer_key: AnswerKey::ShortAnswer(FreeTextKey {
                keywords: vec![
                    "photosynthesis".into(),
                    "sunlight".into(),
                    "glucose".into(),
                    "chlorophyll".into(),
                ],
                weights: None,
                expected_answer:
                    "Photosynthesis uses sunlight and chlorophyll to produce glucose in plants."
                        .into(),
            }),
        });
        submission.insert(
            id,
            "Plants perform photosynthesis using sunligt and chlorophyll to make glucose.",
        );
    }
    (questions, submission)
}

fn bench_keyword_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyword_match");
    let keywords: Vec<String> = vec![
        "photosynthesis".into(),
        "sunlight".into(),
        "glucose".into(),
        "chlorophyll".into(),
        "energy".into(),
    ];
    let answer =
        "Plants perform photosynthesis using sunligt and chlorophyl to convert light into glucose";

    group.bench_function("verbatim_and_fuzzy", |b| {
        b.iter(|| keyword_match(black_box(answer), black_box(&keywords), None))
    });

    group.finish();
}

fn bench_cosine_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("cosine_similarity");
    let expected =
        "Photosynthesis is the process by which plants convert sunlight into chemical energy stored as glucose";
    let answer =
        "Plants use sunlight to produce glucose through photosynthesis in their leaves";

    group.bench_function("short_texts", |b| {
        b.iter(|| cosine_similarity(black_box(answer), black_box(expected)))
    });

    group.finish();
}

fn bench_grade_sheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade_sheet");
    let config = GradingConfig::default();
    let scale = GradingScale::default();

    for count in [5u32, 20, 50] {
        let (questions, submission) = make_sheet(count);
        group.bench_function(format!("{count}_questions"), |b| {
            b.iter(|| {
                grade_sheet(
                    black_box(&submission),
                    black_box(&questions),
                    black_box(&config),
                    black_box(&scale),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keyword_match,
    bench_cosine_similarity,
    bench_grade_sheet
);
criterion_main!(benches);
