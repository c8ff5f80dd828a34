//! Downloadable sheet template.

/// A header row and one example row each for a three-option part, a
/// four-option part and a grouped part.
const TEMPLATE: &str = concat!(
    "part,part_name,group,question_number,question_text,option_a,option_b,option_c,option_d,",
    "correct_answer,explanation,audio_url,image_urls,passage_html,transcript,translation,",
    "group_audio_url,group_image_urls,group_passage_html,group_transcript,group_translation,",
    "difficulty,domain,genre,setting,style,skill_part,skills\n",
    "1,Part 1: Photographs,,1,,He is typing on a keyboard.,He is opening a window.,",
    "He is pouring coffee.,He is hanging a picture.,A,The man's hands are on the keyboard.,",
    "https://cdn.example.com/audio/p1-q1.mp3,https://cdn.example.com/img/p1-q1.jpg,,,,,,,,,",
    "A2,office,,workplace,,1,describe-actions\n",
    "2,Part 2: Question-Response,,2,Where is the meeting room?,On the third floor.,",
    "At two o'clock.,Yes I did.,,A,,https://cdn.example.com/audio/p2-q2.mp3,,,,,,,,,,",
    "B1,,,,,2,wh-questions\n",
    "3,Part 3: Conversations,1,3,What are the speakers discussing?,A delivery delay,",
    "A new hire,A budget report,A client visit,A,,,,,,,https://cdn.example.com/audio/p3-g1.mp3,",
    ",,W: The shipment is late again. M: I'll call the supplier.,,",
    "B2,business,conversation,,,3,main-idea|inference\n",
);

/// The sheet template as CSV bytes.
pub fn template_csv() -> Vec<u8> {
    TEMPLATE.as_bytes().to_vec()
}
